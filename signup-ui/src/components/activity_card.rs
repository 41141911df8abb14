//! Activity Cards
//!
//! One card per activity, in the order the server returned them. Each
//! participant gets a delete button while a teacher is logged in.

use leptos::*;

use crate::components::Loading;
use crate::state::global::{self, ActivityDetails, GlobalState};

/// The whole list, driven by the global activities signal
#[component]
pub fn ActivityList() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <div id="activities-list" class="space-y-4">
            {move || match state.activities.get() {
                global::ActivityList::Loading => view! { <Loading /> }.into_view(),
                global::ActivityList::Failed => view! {
                    <p class="text-red-400">{global::LOAD_FAILED}</p>
                }.into_view(),
                global::ActivityList::Loaded(map) => map
                    .into_iter()
                    .map(|(name, details)| view! { <ActivityCard name=name details=details /> })
                    .collect_view(),
            }}
        </div>
    }
}

#[component]
fn ActivityCard(name: String, details: ActivityDetails) -> impl IntoView {
    let spots_left = details.spots_left();
    let participants = details.participants;

    let participants_view = if participants.is_empty() {
        view! { <p><em>"No participants yet"</em></p> }.into_view()
    } else {
        view! {
            <div class="participants-section">
                <h5 class="font-semibold">"Participants:"</h5>
                <ul class="participants-list">
                    {participants
                        .into_iter()
                        .map(|email| view! { <ParticipantRow activity=name.clone() email=email /> })
                        .collect_view()}
                </ul>
            </div>
        }
        .into_view()
    };

    view! {
        <div class="activity-card bg-gray-800 rounded-lg p-4 space-y-2">
            <h4 class="text-lg font-bold">{name.clone()}</h4>
            <p>{details.description}</p>
            <p><strong>"Schedule:"</strong>" "{details.schedule}</p>
            <p><strong>"Availability:"</strong>" "{format!("{} spots left", spots_left)}</p>
            <div class="participants-container">{participants_view}</div>
        </div>
    }
}

#[component]
fn ParticipantRow(activity: String, email: String) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let label = email.clone();

    let delete_button = move || {
        state.is_logged_in().then(|| {
            let (activity, email) = (activity.clone(), email.clone());
            let on_delete = {
                let (activity, email) = (activity.clone(), email.clone());
                move |_: web_sys::MouseEvent| {
                    spawn_local(state.unregister(activity.clone(), email.clone()));
                }
            };
            view! {
                <button
                    class="delete-btn text-red-400 hover:text-red-300"
                    data-activity=activity
                    data-email=email
                    on:click=on_delete
                >
                    "❌"
                </button>
            }
        })
    };

    view! {
        <li class="flex items-center justify-between">
            <span class="participant-email">{label}</span>
            {delete_button}
        </li>
    }
}
