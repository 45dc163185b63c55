use crate::components::books::BooksList;
use crate::components::form::{
    clear_marked_inputs, FormButton, FormContainer, FormInput, FormLoading, PopUp,
};
use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use crate::forms::{BookForm, BookFormErrors, LoginForm};
use crate::models::Book;
use crate::state::AppContext;
use crate::storage::{clear_session_storage, save_session_to_storage};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_query_map};

const IMAGE_URL_HELP: &str = "Search for your book cover image on Google. On a computer, \
right-click the image and pick \"Copy image address\" from the context menu; on a mobile \
device, tap and hold the image until the menu appears. Paste the copied URL into the \
image URL input.";

/// Pages behind a session send the visitor to the login form and back again
/// via the `redirect` query parameter.
fn redirect_to_login(current_path: &str) {
    let target = format!("/login?redirect={}", urlencoding::encode(current_path));
    let _ = window().location().set_href(&target);
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let session = app_state.0.session;
    let api_client = app_state.0.api_client;
    let navigate = StoredValue::new(use_navigate());

    let name = RwSignal::new(String::new());
    let price = RwSignal::new(String::new());
    let img_src = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let errors: RwSignal<BookFormErrors> = RwSignal::new(BookFormErrors::default());

    let book_to_edit: RwSignal<Option<Book>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);
    let executed: RwSignal<bool> = RwSignal::new(false);
    let error_popup: RwSignal<bool> = RwSignal::new(false);
    let success_popup: RwSignal<bool> = RwSignal::new(false);
    let explanation_popup: RwSignal<bool> = RwSignal::new(false);

    // Both create and update need a bearer token.
    Effect::new(move |_| {
        if session.get_untracked().is_none() {
            redirect_to_login("/advertisement/register");
        }
    });

    // Pick up the book handed over by a listing and pre-fill the fields.
    let edit_state = app_state.clone();
    Effect::new(move |_| {
        if let Some(item) = edit_state.0.take_edit_item() {
            name.set(item.name.clone());
            price.set(item.price.clone());
            img_src.set(item.img_src.clone());
            description.set(item.description.clone());
            book_to_edit.set(Some(item));
        }
    });

    // Leave for the catalog once the success popup has been dismissed.
    Effect::new(move |_| {
        if !success_popup.get() && executed.get() {
            navigate.with_value(|nav| nav("/advertisement", Default::default()));
        }
    });

    let is_edit = move || book_to_edit.get().is_some();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }

        let form = BookForm {
            name: name.get_untracked(),
            price: price.get_untracked(),
            img_src: img_src.get_untracked(),
            description: description.get_untracked(),
        };
        let payload = match form.validate() {
            Ok(payload) => payload,
            Err(e) => {
                errors.set(e);
                return;
            }
        };
        errors.set(BookFormErrors::default());

        let api_client = api_client.get_untracked();
        let editing = book_to_edit.get_untracked();

        loading.set(true);
        clear_marked_inputs();

        spawn_local(async move {
            let result = match &editing {
                None => api_client.register_book(&payload).await,
                Some(book) => api_client.edit_book(book.idbook, &payload).await,
            };
            match result {
                Ok(()) => {
                    success_popup.set(true);
                    executed.set(true);
                }
                Err(e) => {
                    log::warn!("book submission failed: {e}");
                    error_popup.set(true);
                }
            }
            loading.set(false);
        });
    };

    view! {
        <FormContainer title=Signal::derive(move || {
            let title = if is_edit() { "Edit your book" } else { "Add your book" };
            title.to_string()
        })>
            <form class="flex flex-col gap-3" on:submit=on_submit>
                <FormInput
                    title="Name"
                    bind_value=name
                    disabled=loading
                    error=Signal::derive(move || errors.get().name)
                />
                <FormInput
                    title="Price"
                    bind_value=price
                    disabled=loading
                    error=Signal::derive(move || errors.get().price)
                />
                <FormInput
                    title="Image URL"
                    bind_value=img_src
                    disabled=loading
                    error=Signal::derive(move || errors.get().img_src)
                />
                <FormInput
                    title="Description"
                    bind_value=description
                    disabled=loading
                    error=Signal::derive(move || errors.get().description)
                />

                <p
                    class="w-fit cursor-pointer text-xs text-primary underline underline-offset-4"
                    on:click=move |_| explanation_popup.set(true)
                >
                    "?"
                </p>

                <Show when=move || !loading.get() fallback=|| view! { <FormLoading /> }>
                    <FormButton
                        title=Signal::derive(move || {
                            let title = if is_edit() { "Edit" } else { "Add" };
                            title.to_string()
                        })
                        disabled=loading
                    />
                </Show>
            </form>

            <PopUp
                title="Something went wrong"
                content=Signal::derive(move || {
                    let content = if is_edit() {
                        "An error occurred while editing your book, please try again soon..."
                    } else {
                        "An error occurred while adding your book, please try again soon..."
                    };
                    content.to_string()
                })
                trigger=error_popup
            />
            <PopUp
                title="Success!"
                content=Signal::derive(move || {
                    let content = if is_edit() {
                        "Your book has been edited."
                    } else {
                        "Your book has been added to the store."
                    };
                    content.to_string()
                })
                trigger=success_popup
            />
            <PopUp
                title="How to get image URL?"
                content=Signal::derive(|| IMAGE_URL_HELP.to_string())
                trigger=explanation_popup
            />
        </FormContainer>
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let session = app_state.0.session;
    let api_client_signal = app_state.0.api_client;

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let email_error: RwSignal<Option<String>> = RwSignal::new(None);
    let password_error: RwSignal<Option<String>> = RwSignal::new(None);
    let loading: RwSignal<bool> = RwSignal::new(false);

    let query = use_query_map();

    let form_title = Signal::derive(|| "Log into your account".to_string());
    let submit_title = Signal::derive(|| "Log In".to_string());

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }

        let form = LoginForm {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        if let Err(e) = form.validate() {
            email_error.set(e.email);
            password_error.set(e.password);
            return;
        }
        email_error.set(None);
        password_error.set(None);

        let redirect = {
            let target = query.get_untracked().get("redirect").unwrap_or_default();
            if target.is_empty() {
                "/".to_string()
            } else {
                target
            }
        };
        let api_client = api_client_signal.get_untracked();

        loading.set(true);

        spawn_local(async move {
            match api_client.fetch_user_by_email(&form.email).await {
                Ok(_) => {
                    match api_client.verify_credentials(&form.email, &form.password).await {
                        Ok(new_session) => {
                            let mut api_client = api_client;
                            api_client.set_token(new_session.jwt.clone());
                            save_session_to_storage(&new_session);
                            api_client_signal.set(api_client);
                            session.set(Some(new_session));
                            let _ = window().location().set_href(&redirect);
                        }
                        Err(e) => {
                            log::warn!("credential check failed: {e}");
                            password_error.set(Some("Password is wrong".to_string()));
                        }
                    }
                }
                Err(e) => {
                    log::warn!("account lookup failed: {e}");
                    email_error.set(Some("This email doesn't have an account".to_string()));
                }
            }
            loading.set(false);
        });
    };

    view! {
        <Show when=move || session.get().is_none() fallback=|| ().into_view()>
            <FormContainer title=form_title>
                <form class="flex flex-col gap-3" on:submit=on_submit>
                    <FormInput
                        title="Email"
                        bind_value=email
                        disabled=loading
                        error=email_error
                        on_change=Callback::new(move |_: String| email_error.set(None))
                    />
                    <FormInput
                        r#type="password"
                        title="Password"
                        bind_value=password
                        disabled=loading
                        error=password_error
                        on_change=Callback::new(move |_: String| password_error.set(None))
                    />

                    <Show when=move || !loading.get() fallback=|| view! { <FormLoading /> }>
                        <FormButton title=submit_title disabled=loading />
                    </Show>

                    <p class="pt-1 text-xs text-muted-foreground">
                        "Don't have an account? "
                        <a class="text-primary underline underline-offset-4" href="/signup">
                            "Create an account"
                        </a>
                    </p>
                    <p class="text-xs text-muted-foreground">
                        <a class="text-primary underline underline-offset-4" href="/forgot_password">
                            "Forgot password?"
                        </a>
                    </p>
                </form>
            </FormContainer>
        </Show>
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let session = app_state.0.session;
    let api_client = app_state.0.api_client;

    let on_logout = move |_| {
        let mut client = api_client.get_untracked();
        client.clear_token();
        clear_session_storage();
        api_client.set(client);
        session.set(None);
    };

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto w-full max-w-[1080px] px-4 py-8">
                <div class="mb-4 flex items-center justify-between">
                    <div class="space-y-1">
                        <h1 class="text-xl font-semibold">"Books"</h1>
                        <p class="text-xs text-muted-foreground">"Bookstore"</p>
                    </div>

                    <div class="flex items-center gap-2">
                        <Show
                            when=move || session.get().is_some()
                            fallback=|| view! {
                                <Button variant=ButtonVariant::Outline size=ButtonSize::Sm href="/login">
                                    "Log In"
                                </Button>
                            }
                        >
                            <Button variant=ButtonVariant::Outline size=ButtonSize::Sm href="/advertisement">
                                "Your books"
                            </Button>
                            <Button variant=ButtonVariant::Ghost size=ButtonSize::Sm on:click=on_logout>
                                "Sign out"
                            </Button>
                        </Show>
                    </div>
                </div>

                <BooksList />
            </div>
        </div>
    }
}

#[component]
pub fn AdvertisementPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let session = app_state.0.session;

    Effect::new(move |_| {
        if session.get_untracked().is_none() {
            redirect_to_login("/advertisement");
        }
    });

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto w-full max-w-[1080px] px-4 py-8">
                <div class="mb-4 flex items-center justify-between">
                    <div class="space-y-1">
                        <h1 class="text-xl font-semibold">"Your books"</h1>
                        <p class="text-xs text-muted-foreground">
                            "Books you advertise in the store."
                        </p>
                    </div>

                    <div class="flex items-center gap-2">
                        <Button variant=ButtonVariant::Ghost size=ButtonSize::Sm href="/">
                            "Catalog"
                        </Button>
                        <Button size=ButtonSize::Sm href="/advertisement/register">
                            "Add a book"
                        </Button>
                    </div>
                </div>

                <BooksList advertisement=true />
            </div>
        </div>
    }
}
