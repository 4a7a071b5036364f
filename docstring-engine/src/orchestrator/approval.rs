use crate::model::DocumentationBlock;

/// What to do with a presented block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Skip,
    /// Replace the block's lines and present it again.
    Edit(Vec<String>),
    /// Stop the whole run; nothing further is committed.
    Quit,
}

/// Interactive gate between formatting and commit.
pub trait ApprovalOracle {
    fn review(&mut self, block: &DocumentationBlock) -> Decision;
}

/// Accepts everything without asking.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAll;

impl ApprovalOracle for AcceptAll {
    fn review(&mut self, _block: &DocumentationBlock) -> Decision {
        Decision::Accept
    }
}
