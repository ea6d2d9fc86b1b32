//! 问答笔记本的终端界面
//!
//! 导航栏、问题卡片列表、添加问题与查看答案两个对话框。
//! 按 MVI 拆分：
//! - Model (state.rs): App、ViewState 与草稿
//! - View (view/): 只读 App，按当前主题绘制
//! - Intent (actions.rs / input.rs): 按键转为 Action，由 logic.rs 分发

pub mod actions;
pub mod input;
pub mod logic;
pub mod state;
pub mod view;

pub use input::handle_key_event;
pub use state::App;
pub use view::render;
