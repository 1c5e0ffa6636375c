pub mod components;
pub mod lessons;
pub mod phrasebook;
