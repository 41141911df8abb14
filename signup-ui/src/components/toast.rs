//! Message Banner Component
//!
//! Shows the outcome of the last signup or unregister. The banner hides
//! itself; see [`GlobalState::show_banner`].

use leptos::*;

use crate::state::global::{Banner, BannerKind, GlobalState};

/// Banner bound to the global message signal
#[component]
pub fn MessageBanner() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div id="message">
            {move || state.message.get().map(|banner| view! { <BannerLine banner=banner /> })}
        </div>
    }
}

/// One styled message line, also used inside the login modal
#[component]
pub fn BannerLine(banner: Banner) -> impl IntoView {
    let (icon, class) = match banner.kind {
        BannerKind::Success => ("✓", "success bg-green-600"),
        BannerKind::Error => ("✕", "error bg-red-600"),
    };

    view! {
        <div class=format!(
            "{} flex items-center space-x-3 text-white px-4 py-3 rounded-lg shadow-lg animate-slide-in",
            class
        )>
            <span class="text-lg">{icon}</span>
            <span class="text-sm font-medium">{banner.text}</span>
        </div>
    }
}
