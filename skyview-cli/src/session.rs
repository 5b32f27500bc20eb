//! Interactive prompt loop: the terminal counterpart of the single-page view.

use anyhow::Result;
use inquire::{InquireError, Select, Text};
use skyview_core::{PersistenceAdapter, WeatherClient, WeatherView};
use std::fmt;

use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Lookup,
    AddFavorite,
    RemoveFavorite,
    History,
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::Lookup => "Get weather",
            Action::AddFavorite => "Add current city to favorites",
            Action::RemoveFavorite => "Remove a favorite",
            Action::History => "Show weather history",
            Action::Quit => "Quit",
        })
    }
}

/// Actions that make sense for the current state.
fn available_actions(has_reading: bool, has_favorites: bool) -> Vec<Action> {
    let mut actions = vec![Action::Lookup];
    if has_reading {
        actions.push(Action::AddFavorite);
    }
    if has_favorites {
        actions.push(Action::RemoveFavorite);
    }
    actions.push(Action::History);
    actions.push(Action::Quit);
    actions
}

/// `None` when the user cancelled the prompt.
fn cancelled<T>(res: Result<T, InquireError>) -> Result<Option<T>> {
    match res {
        Ok(v) => Ok(Some(v)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn print_page<C: WeatherClient, P: PersistenceAdapter>(view: &WeatherView<C, P>) {
    println!();
    let bg = render::background_line(view.background());
    if !bg.is_empty() {
        println!("{bg}");
    }
    if let Some(card) = view.display() {
        println!("{}\n", render::reading_card(&card));
    }
    if !view.favorites().is_empty() {
        println!("{}\n", render::favorites_list(view.favorites()));
    }
}

pub async fn run<C: WeatherClient, P: PersistenceAdapter>(
    view: &mut WeatherView<C, P>,
) -> Result<()> {
    loop {
        print_page(view);

        let actions = available_actions(view.reading().is_some(), !view.favorites().is_empty());
        let Some(action) = cancelled(Select::new("What next?", actions).prompt())? else {
            break;
        };

        match action {
            Action::Lookup => {
                let Some(raw) = cancelled(Text::new("Enter city:").prompt())? else {
                    continue;
                };

                println!("Loading...");
                if let Err(e) = view.submit_lookup(&raw).await {
                    eprintln!("{}", e.user_message());
                }
            }
            Action::AddFavorite => match view.add_favorite() {
                Ok(true) => {}
                Ok(false) => println!("Already a favorite."),
                Err(e) => eprintln!("{}", e.user_message()),
            },
            Action::RemoveFavorite => {
                let cities: Vec<String> = view.favorites().iter().map(str::to_string).collect();
                let Some(city) = cancelled(Select::new("Remove which city?", cities).prompt())?
                else {
                    continue;
                };

                if let Err(e) = view.remove_favorite(&city) {
                    eprintln!("{}", e.user_message());
                }
            }
            Action::History => {
                view.refresh_history().await;
                println!("{}", render::history_table(view.history()));
            }
            Action::Quit => break,
        }
    }

    Ok(())
}
