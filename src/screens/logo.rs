//! Logo screen: black background with the centered GOLFIN logo.
//!
//! Purely visual. The bootstrap decides how long it stays up.

use crate::screen::ScreenHooks;

/// Logo screen hooks. Nothing to bind, nothing to localize.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LogoScreen;

impl ScreenHooks for LogoScreen {}
