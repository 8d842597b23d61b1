use crossterm::event::{KeyCode, KeyModifiers};

use crate::domain::types::{PrBundle, PrListItem};

#[derive(Debug)]
pub enum Action {
    Input { code: KeyCode, modifiers: KeyModifiers },
    PrListLoaded(Result<Vec<PrListItem>, String>),
    PrLoaded(Result<PrBundle, String>),
    Copied {
        label: String,
        result: Result<(), String>,
    },
    Launched(Result<(), String>),
}
