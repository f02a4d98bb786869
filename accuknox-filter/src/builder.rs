use std::sync::Arc;

use accuknox_common::flow::FlowFilter;

use crate::{Criterion, Dimension, Direction, FilterError};

/// Allow and deny predicate groups sent along a flow request.
///
/// A flow is streamed when it matches at least one `allow` group (or `allow`
/// is empty) and none of the `deny` groups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    allow: Arc<[FlowFilter]>,
    deny: Arc<[FlowFilter]>,
}

impl FilterSet {
    #[inline]
    pub fn allow(&self) -> &[FlowFilter] {
        &self.allow
    }

    #[inline]
    pub fn deny(&self) -> &[FlowFilter] {
        &self.deny
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.allow.is_empty() && self.deny.is_empty()
    }
}

/// Accumulates criteria into a [FilterSet].
///
/// Every criterion becomes its own predicate group: two `--from-ip` criteria
/// are ORed, never merged into the same group.
#[derive(Debug, Default)]
pub struct FilterBuilder {
    allow: Vec<FlowFilter>,
    deny: Vec<FlowFilter>,
    negate_next: bool,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes the criterion to the deny list when `negate` is set, to the allow list otherwise.
    ///
    /// Nothing is recorded when the criterion is invalid.
    pub fn add(
        &mut self,
        direction: Direction,
        dimension: Dimension,
        value: impl Into<String>,
        negate: bool,
    ) -> Result<&mut Self, FilterError> {
        let criterion = Criterion::new(direction, dimension, value)?;
        self.add_criterion(&criterion, negate);
        Ok(self)
    }

    pub fn add_criterion(&mut self, criterion: &Criterion, negate: bool) -> &mut Self {
        let ff = criterion.to_flow_filter();
        if negate {
            self.deny.push(ff);
        } else {
            self.allow.push(ff);
        }
        self
    }

    /// Negates the next pushed criterion only.
    pub fn not(&mut self) -> &mut Self {
        self.negate_next = true;
        self
    }

    /// Adds a criterion, consuming a pending [FilterBuilder::not].
    ///
    /// The pending negation is cleared even when the criterion is rejected.
    pub fn push(
        &mut self,
        direction: Direction,
        dimension: Dimension,
        value: impl Into<String>,
    ) -> Result<&mut Self, FilterError> {
        let negate = std::mem::take(&mut self.negate_next);
        self.add(direction, dimension, value, negate)
    }

    /// Tells whether a `not` is waiting for a criterion.
    #[inline]
    pub fn is_negating(&self) -> bool {
        self.negate_next
    }

    pub fn build(self) -> FilterSet {
        FilterSet {
            allow: self.allow.into(),
            deny: self.deny.into(),
        }
    }
}
