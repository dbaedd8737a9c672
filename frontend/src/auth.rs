use yew::prelude::*;
use yew_router::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::models::{Role, SignupRequest};
use crate::session::use_session;
use crate::utils::{input_value, select_value};
use crate::validation::{self, RegisterErrors, WARD_COUNT};
use crate::Route;

/// Where a freshly signed-in user lands.
pub fn home_for(role: Role) -> Route {
    match role {
        Role::Admin => Route::Admin,
        Role::User => Route::Dashboard,
    }
}

fn error_banner(error: &Option<String>) -> Html {
    match error {
        Some(message) => html!(<div class="form-error">{ message.clone() }</div>),
        None => Html::default(),
    }
}

fn field_error(error: Option<&'static str>) -> Html {
    match error {
        Some(message) => html!(<p class="field-error">{ message }</p>),
        None => Html::default(),
    }
}

/* -------------------------------------------------------------------------- */
/*                                    login                                   */
/* -------------------------------------------------------------------------- */

#[function_component(LoginForm)]
pub fn login_form() -> Html {
    let ctx = use_session();
    let navigator = use_navigator();
    let email_ref = use_node_ref();
    let password_ref = use_node_ref();
    let error = use_state(|| None::<String>);
    let busy = use_state(|| false);

    let onsubmit = {
        let email_ref = email_ref.clone();
        let password_ref = password_ref.clone();
        let error = error.clone();
        let busy = busy.clone();
        let store = ctx.store.clone();

        Callback::from(move |ev: SubmitEvent| {
            ev.prevent_default();
            // one request per form at a time
            if *busy {
                return;
            }
            let email = input_value(&email_ref);
            let password = input_value(&password_ref);
            error.set(None);
            busy.set(true);

            let store = store.clone();
            let error = error.clone();
            let busy = busy.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                let result = store.login(&email, &password).await;
                busy.set(false);
                match result {
                    Ok(user) => {
                        log::info!("signed in as {} ({})", user.email, user.role.as_str());
                        if let Some(navigator) = navigator {
                            navigator.push(&home_for(user.role));
                        }
                    }
                    Err(failure) => error.set(Some(failure.message)),
                }
            });
        })
    };

    html! {
        <div class="auth-card">
            <h1>{ "Welcome Back" }</h1>
            <p class="subtitle">{ "Sign in to your account" }</p>
            { error_banner(&error) }

            <form {onsubmit}>
                <label for="email" class="form-label">{ "Email" }</label>
                <input id="email" ref={email_ref} type="email" class="form-input"
                    placeholder="you@example.com" required={true} />

                <div class="label-row">
                    <label for="password" class="form-label">{ "Password" }</label>
                    <Link<Route> to={Route::ForgotPassword} classes="form-link">{ "Forgot Password?" }</Link<Route>>
                </div>
                <input id="password" ref={password_ref} type="password" class="form-input"
                    placeholder="••••••••" required={true} />

                <button type="submit" class="button primary" disabled={*busy}>
                    { if *busy { "Signing in…" } else { "Sign In" } }
                </button>
            </form>

            <p class="form-footer">
                { "Don't have an account? " }
                <Link<Route> to={Route::Register} classes="form-link">{ "Sign up" }</Link<Route>>
            </p>
        </div>
    }
}

/* -------------------------------------------------------------------------- */
/*                                  register                                  */
/* -------------------------------------------------------------------------- */

#[function_component(RegisterForm)]
pub fn register_form() -> Html {
    let ctx = use_session();
    let navigator = use_navigator();
    let name_ref = use_node_ref();
    let email_ref = use_node_ref();
    let password_ref = use_node_ref();
    let confirm_ref = use_node_ref();
    let address_ref = use_node_ref();
    let phone_ref = use_node_ref();
    let ward_ref = use_node_ref();
    let field_errors = use_state(RegisterErrors::default);
    let error = use_state(|| None::<String>);
    let busy = use_state(|| false);
    let strength = use_state(|| 0u8);

    let on_password_input = {
        let strength = strength.clone();
        let password_ref = password_ref.clone();
        Callback::from(move |_: InputEvent| {
            strength.set(validation::password_strength(&input_value(&password_ref)));
        })
    };

    let onsubmit = {
        let refs = (
            name_ref.clone(),
            email_ref.clone(),
            password_ref.clone(),
            confirm_ref.clone(),
            address_ref.clone(),
            phone_ref.clone(),
            ward_ref.clone(),
        );
        let field_errors = field_errors.clone();
        let error = error.clone();
        let busy = busy.clone();
        let store = ctx.store.clone();

        Callback::from(move |ev: SubmitEvent| {
            ev.prevent_default();
            if *busy {
                return;
            }
            let (name, email, password, confirm, address, phone, ward) = &refs;
            let fields = SignupRequest {
                name: input_value(name).trim().to_string(),
                email: input_value(email).trim().to_string(),
                password: input_value(password),
                address: input_value(address).trim().to_string(),
                phone_number: input_value(phone).split_whitespace().collect(),
                ward_number: select_value(ward),
            };
            let errors = validation::register_form(&fields, &input_value(confirm));
            let invalid = !errors.is_empty();
            field_errors.set(errors);
            if invalid {
                error.set(Some("Please fix the validation errors above".into()));
                return;
            }

            error.set(None);
            busy.set(true);
            let store = store.clone();
            let error = error.clone();
            let busy = busy.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                let result = store.register(fields).await;
                busy.set(false);
                match result {
                    Ok(user) => {
                        log::info!("account created for {}", user.email);
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::VerifyEmail);
                        }
                    }
                    Err(failure) => error.set(Some(failure.message)),
                }
            });
        })
    };

    let label = validation::strength_label(*strength);

    html! {
        <div class="auth-card">
            <h1>{ "Create an Account" }</h1>
            <p class="subtitle">{ "Join our community and start reporting issues" }</p>
            { error_banner(&error) }

            <form {onsubmit}>
                <label for="name" class="form-label">{ "Full Name" }</label>
                <input id="name" ref={name_ref} type="text" class="form-input" placeholder="Ram Chandra" />
                { field_error(field_errors.name) }

                <label for="email" class="form-label">{ "Email" }</label>
                <input id="email" ref={email_ref} type="email" class="form-input" placeholder="you@example.com" />
                { field_error(field_errors.email) }

                <label for="password" class="form-label">{ "Password" }</label>
                <input id="password" ref={password_ref} type="password" class="form-input"
                    oninput={on_password_input} />
                <div class="strength">
                    <div class={classes!("strength-bar", label.to_lowercase())}
                        style={format!("width: {}%", *strength)}></div>
                    <span>{ label }</span>
                </div>
                { field_error(field_errors.password) }

                <label for="confirm" class="form-label">{ "Confirm Password" }</label>
                <input id="confirm" ref={confirm_ref} type="password" class="form-input" />
                { field_error(field_errors.confirm_password) }

                <label for="address" class="form-label">{ "Address" }</label>
                <input id="address" ref={address_ref} type="text" class="form-input" />
                { field_error(field_errors.address) }

                <label for="phone" class="form-label">{ "Phone Number" }</label>
                <input id="phone" ref={phone_ref} type="tel" class="form-input" placeholder="98XXXXXXXX" />
                { field_error(field_errors.phone_number) }

                <label for="ward" class="form-label">{ "Ward Number" }</label>
                <select id="ward" ref={ward_ref} class="form-input">
                    <option value="" selected={true} disabled={true}>{ "Select your ward" }</option>
                    { for (1..=WARD_COUNT).map(|n| html! {
                        <option key={n.to_string()} value={n.to_string()}>{ format!("Ward {n}") }</option>
                    }) }
                </select>
                { field_error(field_errors.ward_number) }

                <button type="submit" class="button primary" disabled={*busy}>
                    { if *busy { "Creating account…" } else { "Create Account" } }
                </button>
            </form>

            <p class="form-footer">
                { "Already have an account? " }
                <Link<Route> to={Route::Login} classes="form-link">{ "Sign in" }</Link<Route>>
            </p>
        </div>
    }
}

/* -------------------------------------------------------------------------- */
/*                                verify email                                */
/* -------------------------------------------------------------------------- */

#[function_component(VerifyEmailForm)]
pub fn verify_email_form() -> Html {
    let ctx = use_session();
    let navigator = use_navigator();
    let code_ref = use_node_ref();
    let error = use_state(|| None::<String>);
    let busy = use_state(|| false);

    let onsubmit = {
        let code_ref = code_ref.clone();
        let error = error.clone();
        let busy = busy.clone();
        let store = ctx.store.clone();

        Callback::from(move |ev: SubmitEvent| {
            ev.prevent_default();
            if *busy {
                return;
            }
            let code = match validation::verification_code(&input_value(&code_ref)) {
                Ok(code) => code,
                Err(message) => {
                    error.set(Some(message.into()));
                    return;
                }
            };

            error.set(None);
            busy.set(true);
            let store = store.clone();
            let error = error.clone();
            let busy = busy.clone();
            let navigator = navigator.clone();
            spawn_local(async move {
                let result = store.verify_email(&code).await;
                busy.set(false);
                match result {
                    Ok(verified) => {
                        if let Some(message) = verified.message {
                            log::info!("{message}");
                        }
                        if let Some(navigator) = navigator {
                            navigator.push(&Route::Dashboard);
                        }
                    }
                    Err(failure) => error.set(Some(failure.message)),
                }
            });
        })
    };

    html! {
        <div class="auth-card">
            <h1>{ "Verify Your Email" }</h1>
            <p class="subtitle">{ "We've sent a 6-digit verification code to your email address." }</p>
            { error_banner(&error) }

            <form {onsubmit}>
                <label for="code" class="form-label">{ "Enter Verification Code" }</label>
                <input id="code" ref={code_ref} type="text" inputmode="numeric" maxlength="6"
                    class="form-input code-input" autocomplete="one-time-code" />
                <button type="submit" class="button primary" disabled={*busy}>
                    { if *busy { "Verifying…" } else { "Verify Email" } }
                </button>
            </form>

            <p class="form-footer">
                <Link<Route> to={Route::Register} classes="form-link">{ "Back to Register Page" }</Link<Route>>
            </p>
        </div>
    }
}

/* -------------------------------------------------------------------------- */
/*                               forgot password                              */
/* -------------------------------------------------------------------------- */

#[function_component(ForgotPassword)]
pub fn forgot_password() -> Html {
    html! {
        <div class="auth-card">
            <h1>{ "Forgot Password ?" }</h1>
            <p class="subtitle">
                { "Password resets are handled by your ward office. Contact us at contact@urbanfix.com." }
            </p>
            <p class="form-footer">
                <Link<Route> to={Route::Login} classes="form-link">{ "Back to Sign In" }</Link<Route>>
            </p>
        </div>
    }
}
