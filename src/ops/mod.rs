pub mod balance;
pub mod calendar;
pub mod chat_ops;
pub mod expense_ops;
pub mod feed;
pub mod task_filter;
