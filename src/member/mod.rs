//! Chama members and the members table.

mod actions;
mod core;
mod members_page;

pub use actions::{delete_member_endpoint, remind_member_endpoint};
pub use core::{
    Member, MemberField, MemberId, MemberStatus, MemberTotals, RemoveMember, Role, sample_members,
};
pub use members_page::{MemberQuery, MemberState, get_members_page};
