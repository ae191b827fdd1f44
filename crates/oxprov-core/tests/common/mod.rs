pub mod git_fixture;
