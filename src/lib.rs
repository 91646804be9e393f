// Library root
// -----------
// Editing tools for the JSON documents behind the club website. The binary
// (`main.rs`) wires configuration and logging, then hands over to `ui`.
//
// Module responsibilities:
// - `config`: where every document lives (`Config`), built from the
//   environment or from an explicit root directory.
// - `error`: `ContentError`, shared by every content operation.
// - `models`: typed records for each document.
// - `store`: validated loading and temp-then-rename writes, including
//   staged writes that replace two documents together.
// - `gallery`, `potw`, `events`, `team`: the operations for each content
//   area. They never prompt, so tests drive them directly.
// - `ui`: the interactive menu and prompts.
pub mod config;
pub mod error;
pub mod events;
pub mod gallery;
pub mod models;
pub mod potw;
pub mod store;
pub mod team;
pub mod ui;
