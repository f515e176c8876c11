mod machine_tests;
mod mocks;
