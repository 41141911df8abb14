//! Loading Component

use leptos::*;

/// Placeholder shown until the first activity fetch settles
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-12 space-x-3 text-gray-500">
            <div class="loading-spinner w-6 h-6" />
            <p>"Loading activities..."</p>
        </div>
    }
}
