//! The typed app abstraction the shell dispatches through.

use crate::types::{AppId, Button};

/// An app that can hold input focus.
///
/// The shell, scheduler and transport only ever hold an [`AppId`] and call
/// back through this trait; callbacks never run concurrently or reentrantly.
pub trait App<P: ?Sized> {
    fn id(&self) -> AppId;

    /// Gained focus.
    fn on_entry(&mut self, p: &mut P);

    /// Lost focus.
    fn on_exit(&mut self, p: &mut P);

    fn on_button(&mut self, p: &mut P, button: Button);

    /// Inbound packet for an endpoint this app registered.
    fn on_packet(&mut self, _p: &mut P, _data: &[u8]) {}

    /// Periodic task owned by this app fired.
    fn on_tick(&mut self, _p: &mut P) {}
}
