pub mod authenticator;
pub mod poller;
pub mod renderer;

pub use authenticator::{
    AuthError, AuthState, Authenticator, COUNTDOWN_TICK, MIN_DISPLAY_WIDTH, RETRY_COUNTDOWN,
    SETTLE_DELAY,
};
pub use poller::{PollCycle, PollError, PortfolioPoller};
pub use renderer::{render, status_lines, StatusLine};
