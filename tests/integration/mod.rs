pub mod formatting_tests;
pub mod mock_bot;
pub mod test_utils;
