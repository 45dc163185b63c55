use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Card, CardContent,
    CardDescription, CardFooter, CardHeader, CardTitle,
};
use crate::models::Book;
use crate::state::AppContext;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

/// Catalog listing. Read-only by default; in advertisement mode each card
/// carries an Edit action that hands the book to the registration form.
#[component]
pub fn BooksList(#[prop(optional)] advertisement: bool) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let edit_item = app_state.0.edit_item;
    let navigate = StoredValue::new(use_navigate());

    let books: RwSignal<Vec<Book>> = RwSignal::new(vec![]);
    let loading: RwSignal<bool> = RwSignal::new(false);
    let error: RwSignal<Option<String>> = RwSignal::new(None);

    let load_books = move || {
        let api_client = app_state.0.api_client.get_untracked();
        loading.set(true);
        error.set(None);

        spawn_local(async move {
            match api_client.list_books().await {
                Ok(list) => books.set(list),
                Err(e) => {
                    log::warn!("loading books failed: {e}");
                    error.set(Some(
                        "Could not load books, please try again soon...".to_string(),
                    ));
                }
            }
            loading.set(false);
        });
    };

    Effect::new(move |_| {
        load_books();
    });

    view! {
        <div data-name="BooksList">
            <Show when=move || error.get().is_some() fallback=|| ().into_view()>
                {move || {
                    error.get().map(|e| view! {
                        <Alert class="mb-4 border-destructive/30">
                            <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                        </Alert>
                    })
                }}
            </Show>

            <Show
                when=move || !books.get().is_empty()
                fallback=move || view! {
                    <div class="text-xs text-muted-foreground">
                        {move || if loading.get() { "Loading books..." } else { "No books yet." }}
                    </div>
                }
            >
                <div class="grid gap-4 sm:grid-cols-2 lg:grid-cols-3">
                    {move || {
                        books
                            .get()
                            .into_iter()
                            .map(|book| {
                                let book_for_edit = book.clone();
                                let on_edit = Callback::new(move |_: web_sys::MouseEvent| {
                                    edit_item.set(Some(book_for_edit.clone()));
                                    navigate.with_value(|nav| {
                                        nav("/advertisement/register", Default::default());
                                    });
                                });

                                view! {
                                    <Card class="gap-0 overflow-hidden py-0">
                                        <img
                                            src=book.img_src
                                            alt=book.name.clone()
                                            class="h-40 w-full border-b object-cover"
                                        />
                                        <CardHeader class="p-4">
                                            <CardTitle class="truncate text-sm">{book.name}</CardTitle>
                                            <CardDescription class="text-xs">
                                                {format!("$ {}", book.price)}
                                            </CardDescription>
                                        </CardHeader>
                                        <CardContent class="px-4 pb-4">
                                            <p class="line-clamp-2 text-xs text-muted-foreground">
                                                {book.description}
                                            </p>
                                        </CardContent>
                                        <Show when=move || advertisement fallback=|| ().into_view()>
                                            <CardFooter class="px-4 pb-4">
                                                <Button
                                                    variant=ButtonVariant::Outline
                                                    size=ButtonSize::Sm
                                                    on:click=move |ev: web_sys::MouseEvent| on_edit.run(ev)
                                                >
                                                    "Edit"
                                                </Button>
                                            </CardFooter>
                                        </Show>
                                    </Card>
                                }
                            })
                            .collect_view()
                    }}
                </div>
            </Show>
        </div>
    }
}
