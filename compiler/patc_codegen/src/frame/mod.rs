//! Local-variable slot allocation for temporaries.

use tracing::trace;

use crate::{CodegenError, OperandKind};

#[derive(Copy, Clone, Debug)]
struct Temp {
    slot: u16,
    kind: OperandKind,
}

/// Hands out temporary slots above the method's declared locals.
///
/// Temporaries are strictly nested: the slot released must be the one most
/// recently acquired.
#[derive(Debug, Default)]
pub struct FrameMap {
    next: u16,
    temps: Vec<Temp>,
}

impl FrameMap {
    pub fn new() -> Self {
        FrameMap::default()
    }

    /// A frame whose first `slot` slots are already taken by parameters and
    /// locals.
    pub fn with_first_free(slot: u16) -> Self {
        FrameMap {
            next: slot,
            temps: Vec::new(),
        }
    }

    pub fn first_free(&self) -> u16 {
        self.next
    }

    pub fn live_temps(&self) -> usize {
        self.temps.len()
    }

    pub fn enter_temp(&mut self, kind: OperandKind) -> Result<u16, CodegenError> {
        let slot = self.next;
        self.next = slot
            .checked_add(kind.width())
            .ok_or(CodegenError::FrameOverflow)?;
        self.temps.push(Temp { slot, kind });
        trace!(slot, %kind, "enter temp");
        Ok(slot)
    }

    pub fn leave_temp(&mut self, slot: u16) -> Result<(), CodegenError> {
        let Some(top) = self.temps.last().copied() else {
            return Err(CodegenError::NoLiveTemp(slot));
        };
        if top.slot != slot {
            return Err(CodegenError::TempOutOfOrder {
                expected: top.slot,
                found: slot,
            });
        }
        self.temps.pop();
        self.next = top.slot;
        trace!(slot, kind = %top.kind, "leave temp");
        Ok(())
    }
}
