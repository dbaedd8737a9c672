use yew::prelude::*;
use yew_router::prelude::*;

use crate::session::use_session;
use crate::Route;

#[derive(Properties, PartialEq)]
pub struct LogoutProps {
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(Logout)]
pub fn logout(props: &LogoutProps) -> Html {
    let ctx = use_session();
    let navigator = use_navigator();

    let onclick = Callback::from(move |_: MouseEvent| {
        let store = ctx.store.clone();
        let navigator = navigator.clone();

        wasm_bindgen_futures::spawn_local(async move {
            // clears the session whatever the server answers
            store.logout().await;
            if let Some(navigator) = navigator {
                navigator.push(&Route::Landing);
            }
        });
    });

    html! {
        <button class={props.class.clone()} {onclick} type="button">
            { "Logout" }
        </button>
    }
}
