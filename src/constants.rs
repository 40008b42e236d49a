pub const MEMBER_ADDED: &str = "MEMBER_ADDED";
pub const GROUP_CREATED: &str = "GROUP_CREATED";
pub const GROUP_MEMBER_ADDED: &str = "GROUP_MEMBER_ADDED";
pub const EXPENSE_ADDED: &str = "EXPENSE_ADDED";
pub const PAYMENT_RECORDED: &str = "PAYMENT_RECORDED";
pub const BALANCE_QUERIED: &str = "BALANCE_QUERIED";
pub const SUMMARY_QUERIED: &str = "SUMMARY_QUERIED";
pub const ACTIVITY_QUERIED: &str = "ACTIVITY_QUERIED";
pub const SETTLEMENTS_SUGGESTED: &str = "SETTLEMENTS_SUGGESTED";

pub const DEFAULT_MAX_EXPENSE_AMOUNT: i64 = 1_000_000;
pub const DEFAULT_MAX_PARTICIPANTS: usize = 100;
pub const DEFAULT_MAX_TEXT_LENGTH: usize = 255;
