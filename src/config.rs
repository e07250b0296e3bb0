//! Tuning knobs for [`AvlTree`](crate::AvlTree).

use crate::error::ConfigurationError;
use crate::render::DEFAULT_FIELD_WIDTH;

/// How balance is restored after an insertion or removal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BalanceStrategy {
    /// Walk from the modified position up to the root and stop as soon as a
    /// subtree height stays the same.
    #[default]
    Path,
    /// Run a post-order balance pass over the whole tree after every change.
    /// O(n) per operation; yields the same shapes as `Path`.
    FullTree,
}

/// What happens to balance after a removal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DeletePolicy {
    /// Rebalance after every removal. The AVL condition always holds.
    #[default]
    Rebalance,
    /// Only refresh heights after a removal. The tree may then stay out of
    /// balance: a `Path` insertion only repairs its own path, so balance is
    /// restored by [`AvlTree::balance`](crate::AvlTree::balance) or by the
    /// next insertion under `FullTree`.
    Preserve,
}

/// Configuration of an [`AvlTree`](crate::AvlTree).
///
/// ```
/// use avl_engine::{AvlConfig, AvlTree, BalanceStrategy, DeletePolicy};
/// let config = AvlConfig::default()
///     .with_balance_strategy(BalanceStrategy::FullTree)
///     .with_delete_policy(DeletePolicy::Preserve)
///     .with_field_width(6);
/// let tree = AvlTree::<u32>::with_config(config).unwrap();
/// assert_eq!(tree.config().field_width, 6);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AvlConfig {
    pub balance_strategy: BalanceStrategy,
    pub delete_policy: DeletePolicy,
    /// Column width used by the `Entire` rendering.
    pub field_width: usize,
}

impl AvlConfig {
    pub fn with_balance_strategy(mut self, balance_strategy: BalanceStrategy) -> Self {
        self.balance_strategy = balance_strategy;
        self
    }

    pub fn with_delete_policy(mut self, delete_policy: DeletePolicy) -> Self {
        self.delete_policy = delete_policy;
        self
    }

    pub fn with_field_width(mut self, field_width: usize) -> Self {
        self.field_width = field_width;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.field_width == 0 {
            return Err(ConfigurationError::ZeroFieldWidth);
        }
        Ok(())
    }
}

impl Default for AvlConfig {
    fn default() -> Self {
        Self {
            balance_strategy: BalanceStrategy::default(),
            delete_policy: DeletePolicy::default(),
            field_width: DEFAULT_FIELD_WIDTH,
        }
    }
}
