mod common;
mod notification_tests;
