//! Terminal front-end
//!
//! Plain-text rendition of the page for the command-line client. Banners are
//! printed once; there is nothing to hide afterwards.

use std::fmt;
use std::io::{self, Write};

use super::{
    ActivityListPanel, ActivityListing, Banner, BannerKind, LoginPanel, MessageBanner,
    SessionPanel, SignupPanel,
};

const AUTH_REQUIRED: &str = "Log in as a teacher to register or unregister students.";

/// [`View`](super::View) writing to any [`Write`] sink
pub struct TerminalView<W: Write> {
    out: W,
    last_banner: Option<Banner>,
    failures: usize,
    error: Option<io::Error>,
}

impl TerminalView<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last_banner: None,
            failures: 0,
            error: None,
        }
    }

    /// Most recent banner or login message
    pub fn last_banner(&self) -> Option<&Banner> {
        self.last_banner.as_ref()
    }

    /// Whether any error message or list failure was shown
    pub fn had_failure(&self) -> bool {
        self.failures > 0
    }

    /// Flush and report the first write error, if any
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.out.write_fmt(args).and_then(|_| self.out.write_all(b"\n")) {
            self.error = Some(e);
        }
    }

    fn banner(&mut self, banner: &Banner) {
        let marker = match banner.kind {
            BannerKind::Success => "✓",
            BannerKind::Error => "✕",
        };
        if banner.is_error() {
            self.failures += 1;
        }
        self.line(format_args!("{} {}", marker, banner.text));
        self.last_banner = Some(banner.clone());
    }
}

impl<W: Write> SessionPanel for TerminalView<W> {
    fn show_logged_in(&mut self, username: &str) {
        self.line(format_args!("Logged in as {}", username));
    }

    fn show_logged_out(&mut self) {
        self.line(format_args!("Not logged in. {}", AUTH_REQUIRED));
    }
}

impl<W: Write> LoginPanel for TerminalView<W> {
    fn show_login_message(&mut self, banner: &Banner) {
        self.banner(banner);
    }
}

impl<W: Write> SignupPanel for TerminalView<W> {
    fn reset_signup_form(&mut self) {}
}

impl<W: Write> ActivityListPanel for TerminalView<W> {
    fn render_activities(&mut self, listing: &ActivityListing) {
        if listing.is_empty() {
            self.line(format_args!("No activities available."));
            return;
        }

        for card in &listing.cards {
            self.line(format_args!(""));
            self.line(format_args!("{}", card.name));
            self.line(format_args!("  {}", card.description));
            self.line(format_args!("  Schedule: {}", card.schedule));
            self.line(format_args!("  Availability: {}", card.availability()));

            if card.has_participants() {
                self.line(format_args!("  Participants:"));
                for row in &card.participants {
                    if row.removable {
                        self.line(format_args!("    - {}  [x]", row.email));
                    } else {
                        self.line(format_args!("    - {}", row.email));
                    }
                }
            } else {
                self.line(format_args!("  No participants yet"));
            }
        }
    }

    fn show_activities_error(&mut self, message: &str) {
        self.failures += 1;
        self.line(format_args!("{}", message));
    }
}

impl<W: Write> MessageBanner for TerminalView<W> {
    fn show_banner(&mut self, banner: &Banner) {
        self.banner(banner);
    }
}
