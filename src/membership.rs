//! Channel membership lookup.

/// Read-only view of who holds operator status where.
///
/// Supplied by the connection layer, which tracks channel user lists.
pub trait ChannelMembership {
    /// Whether `nick` is a channel operator in `channel`.
    fn is_oper(&self, channel: &str, nick: &str) -> bool;
}

