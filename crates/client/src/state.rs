//! Immutable view state.
//!
//! A `Snapshot` is never mutated in place; `reduce` returns the next one.

use uuid::Uuid;

use common::types::{ServiceTypeView, TariffView};

use crate::notice::Notice;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    pub tariffs: Vec<TariffView>,
    pub types: Vec<ServiceTypeView>,
    /// Tariff whose services are expanded.
    pub selected: Option<Uuid>,
    pub notice: Option<Notice>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Full collections fetched from the server.
    Loaded { tariffs: Vec<TariffView>, types: Vec<ServiceTypeView> },
    Select(Option<Uuid>),
    Notify(Notice),
    DismissNotice,
}

impl Snapshot {
    pub fn selected_tariff(&self) -> Option<&TariffView> {
        let id = self.selected?;
        self.tariffs.iter().find(|t| t.id == id)
    }

    pub fn type_name(&self, id: Uuid) -> Option<&str> {
        self.types.iter().find(|t| t.id == id).map(|t| t.name.as_str())
    }
}

pub fn reduce(prev: &Snapshot, action: Action) -> Snapshot {
    match action {
        Action::Loaded { tariffs, types } => {
            // drop a selection whose tariff is gone
            let selected = prev.selected.filter(|id| tariffs.iter().any(|t| t.id == *id));
            Snapshot { tariffs, types, selected, notice: prev.notice.clone() }
        }
        Action::Select(selected) => Snapshot { selected, ..prev.clone() },
        Action::Notify(n) => Snapshot { notice: Some(n), ..prev.clone() },
        Action::DismissNotice => Snapshot { notice: None, ..prev.clone() },
    }
}
