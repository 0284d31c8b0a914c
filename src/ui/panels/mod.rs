//! Side panels: the channel sidebar and the member list.

pub mod channel_list;
pub mod member_list;

pub use channel_list::render_channel_list;
pub use member_list::{group_members, render_member_list};
