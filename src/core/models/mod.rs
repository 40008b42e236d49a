pub mod activity;
pub mod audit;
pub mod balance;
pub mod currency;
pub mod expense;
pub mod group;
pub mod ids;
pub mod member;
pub mod money;
pub mod payment;

pub use activity::{ActivityEntry, ActivityKind, Involvement};
pub use audit::AppLog;
pub use balance::{
    Balance, BalanceReport, Counterparty, GroupReport, MemberBalanceView, MemberSummary, Scope, Transfer,
};
pub use currency::Currency;
pub use expense::{Expense, ExpenseCandidate, SplitKind};
pub use group::Group;
pub use ids::{GroupId, MemberId, RecordId};
pub use member::Member;
pub use money::{Money, MoneyError};
pub use payment::{Payment, PaymentCandidate};
