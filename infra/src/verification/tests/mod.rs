mod create_provider_tests;
mod mock_provider_tests;
