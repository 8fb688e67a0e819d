//! Command handling for the Pokedex REPL
//!
//! This module contains the application state and the handlers for every
//! REPL command. Network-backed commands go through the PokeAPI client,
//! which consults the response cache before fetching. Output formatting is
//! kept in pure helper functions so it can be tested without the network.

use std::collections::HashMap;

use rand::Rng;
use thiserror::Error;

use crate::api::{ApiError, LocationArea, LocationAreaPage, PokeApiClient, Pokemon};
use crate::cache::Cache;

/// Catch rolls below this value succeed
const CATCH_THRESHOLD: u32 = 40;

/// Every REPL command with its help description
pub const COMMANDS: &[(&str, &str)] = &[
    ("help", "Displays a help message"),
    ("exit", "Exit the Pokedex"),
    ("map", "Discover new areas"),
    ("mapb", "Display previous areas"),
    ("explore", "List pokemon in an area"),
    ("catch", "Attempt to capture a pokemon"),
    ("inspect", "Print stats about a caught pokemon"),
    ("pokedex", "Print all the captured pokemon names"),
];

/// Errors produced by command handlers
#[derive(Debug, Error)]
pub enum CommandError {
    /// A PokeAPI request or parse failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Input did not match any known command
    #[error("Unknown command: '{0}'. Type 'help' to list commands")]
    Unknown(String),

    /// A command was invoked without its required argument
    #[error("The {command} command needs {what}")]
    MissingArgument {
        /// The command that was invoked
        command: &'static str,
        /// Description of the missing argument
        what: &'static str,
    },
}

/// Pagination cursor over the location-area listing
#[derive(Debug, Clone)]
pub struct PageCursor {
    /// URL of the next page to fetch
    pub next: Option<String>,
    /// URL of the previous page, if we have moved past the first
    pub previous: Option<String>,
}

impl PageCursor {
    /// Creates a cursor positioned at the first listing page
    pub fn at_first_page() -> Self {
        Self {
            next: Some(PokeApiClient::first_location_page_url()),
            previous: None,
        }
    }

    /// Advances the cursor to the links reported by a fetched page
    pub fn apply(&mut self, page: &LocationAreaPage) {
        self.next = page.next.clone();
        self.previous = page.previous.clone();
    }
}

/// Main application state for the REPL
pub struct App {
    /// Pagination cursor for the map/mapb commands
    pub cursor: PageCursor,
    /// Pokemon caught so far, keyed by name
    pub caught: HashMap<String, Pokemon>,
    /// Flag indicating the REPL should stop
    pub should_quit: bool,
    /// PokeAPI client (holds the response cache)
    client: PokeApiClient,
}

impl App {
    /// Creates the application state backed by the given response cache
    pub fn new(cache: Cache) -> Self {
        Self {
            cursor: PageCursor::at_first_page(),
            caught: HashMap::new(),
            should_quit: false,
            client: PokeApiClient::new(cache),
        }
    }

    /// Parses one input line and runs the matching command.
    ///
    /// Blank lines are ignored. Handler errors are returned to the caller;
    /// they never terminate the REPL.
    pub async fn dispatch(&mut self, line: &str) -> Result<(), CommandError> {
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            return Ok(());
        };
        let arg = parts.next();

        match command {
            "help" => {
                self.command_help();
                Ok(())
            }
            "exit" => {
                self.command_exit();
                Ok(())
            }
            "map" => self.command_map().await,
            "mapb" => self.command_mapb().await,
            "explore" => {
                let area = arg.ok_or(CommandError::MissingArgument {
                    command: "explore",
                    what: "an area name",
                })?;
                self.command_explore(area).await
            }
            "catch" => {
                let name = arg.ok_or(CommandError::MissingArgument {
                    command: "catch",
                    what: "a pokemon name",
                })?;
                self.command_catch(name).await
            }
            "inspect" => {
                let name = arg.ok_or(CommandError::MissingArgument {
                    command: "inspect",
                    what: "a pokemon name",
                })?;
                self.command_inspect(name);
                Ok(())
            }
            "pokedex" => {
                self.command_pokedex();
                Ok(())
            }
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }

    /// Prints usage for every command
    fn command_help(&self) {
        println!("{}", help_text());
    }

    /// Flags the REPL for termination
    fn command_exit(&mut self) {
        self.should_quit = true;
    }

    /// Fetches and prints the next page of location areas
    async fn command_map(&mut self) -> Result<(), CommandError> {
        let Some(url) = self.cursor.next.clone() else {
            println!("You've reached the last page.");
            return Ok(());
        };

        let page = self.client.fetch_location_page(&url).await?;
        self.cursor.apply(&page);
        print!("{}", render_locations(&page));
        Ok(())
    }

    /// Fetches and prints the previous page of location areas
    async fn command_mapb(&mut self) -> Result<(), CommandError> {
        let Some(url) = self.cursor.previous.clone() else {
            println!("You're on the first page.");
            self.cursor = PageCursor::at_first_page();
            return Ok(());
        };

        let page = self.client.fetch_location_page(&url).await?;
        self.cursor.apply(&page);
        print!("{}", render_locations(&page));
        Ok(())
    }

    /// Lists the pokemon encountered in the named area
    async fn command_explore(&self, area_name: &str) -> Result<(), CommandError> {
        let area = self.client.fetch_location_area(area_name).await?;
        print!("{}", render_encounters(&area));
        Ok(())
    }

    /// Attempts to catch the named pokemon
    async fn command_catch(&mut self, name: &str) -> Result<(), CommandError> {
        if self.caught.contains_key(name) {
            println!("Pokemon already captured.");
            return Ok(());
        }

        let pokemon = self.client.fetch_pokemon(name).await?;
        println!("Throwing a Pokeball at {}...", name);

        if attempt_catch(&mut rand::thread_rng(), pokemon.base_experience) {
            println!("{} was caught!", name);
            self.caught.insert(name.to_string(), pokemon);
        } else {
            println!("{} escaped!", name);
        }
        Ok(())
    }

    /// Prints stats for a caught pokemon
    fn command_inspect(&self, name: &str) {
        match self.caught.get(name) {
            Some(pokemon) => print!("{}", render_pokemon_details(pokemon)),
            None => println!("you have not caught that pokemon"),
        }
    }

    /// Lists every caught pokemon
    fn command_pokedex(&self) {
        print!("{}", render_pokedex(&self.caught));
    }
}

/// Rolls a catch attempt weighted against the pokemon's base experience.
///
/// Stronger pokemon (higher base experience) widen the roll range and are
/// harder to catch; the range is floored so weak pokemon still have a small
/// chance to escape.
fn attempt_catch<R: Rng>(rng: &mut R, base_experience: u32) -> bool {
    let ceiling = base_experience.max(CATCH_THRESHOLD + 1);
    rng.gen_range(0..ceiling) < CATCH_THRESHOLD
}

/// Formats the help message listing every command
pub fn help_text() -> String {
    let mut out = String::from("Welcome to the Pokedex!\nUsage:\n");
    for (name, description) in COMMANDS {
        out.push_str(&format!("{}: {}\n", name, description));
    }
    out
}

/// Formats the area names of one listing page, one per line
pub fn render_locations(page: &LocationAreaPage) -> String {
    let mut out = String::new();
    for result in &page.results {
        out.push_str(&result.name);
        out.push('\n');
    }
    out
}

/// Formats the encounter list of a location area
pub fn render_encounters(area: &LocationArea) -> String {
    let mut out = format!("Exploring {}...\nFound Pokemon:\n", area.name);
    for encounter in &area.pokemon_encounters {
        out.push_str(&format!(" - {}\n", encounter.pokemon.name));
    }
    out
}

/// Formats the detail view printed by the inspect command
pub fn render_pokemon_details(pokemon: &Pokemon) -> String {
    let mut out = format!(
        "Name: {}\nHeight: {}\nWeight: {}\nStats:\n",
        pokemon.name, pokemon.height, pokemon.weight
    );
    for stat in &pokemon.stats {
        out.push_str(&format!(" - {}: {}\n", stat.stat.name, stat.base_stat));
    }
    out.push_str("Types:\n");
    for slot in &pokemon.types {
        out.push_str(&format!(" - {}\n", slot.type_.name));
    }
    out
}

/// Formats the list of caught pokemon names
pub fn render_pokedex(caught: &HashMap<String, Pokemon>) -> String {
    let mut out = String::from("Your Pokedex:\n");
    let mut names: Vec<&str> = caught.keys().map(String::as_str).collect();
    names.sort_unstable();
    for name in names {
        out.push_str(&format!(" - {}\n", name));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{NamedResource, PokemonEncounter, PokemonStat, PokemonTypeSlot};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    fn named(name: &str) -> NamedResource {
        NamedResource {
            name: name.to_string(),
            url: format!("https://pokeapi.co/api/v2/{}/", name),
        }
    }

    fn sample_pokemon() -> Pokemon {
        Pokemon {
            name: "pikachu".to_string(),
            base_experience: 112,
            height: 4,
            weight: 60,
            stats: vec![
                PokemonStat {
                    base_stat: 35,
                    stat: named("hp"),
                },
                PokemonStat {
                    base_stat: 55,
                    stat: named("attack"),
                },
            ],
            types: vec![PokemonTypeSlot {
                slot: 1,
                type_: named("electric"),
            }],
        }
    }

    #[test]
    fn test_page_cursor_starts_at_first_page() {
        let cursor = PageCursor::at_first_page();
        assert!(cursor.next.as_deref().unwrap().contains("offset=0"));
        assert!(cursor.previous.is_none());
    }

    #[test]
    fn test_page_cursor_apply_follows_page_links() {
        let mut cursor = PageCursor::at_first_page();
        let page = LocationAreaPage {
            count: 100,
            next: Some("next-url".to_string()),
            previous: Some("prev-url".to_string()),
            results: vec![],
        };

        cursor.apply(&page);
        assert_eq!(cursor.next.as_deref(), Some("next-url"));
        assert_eq!(cursor.previous.as_deref(), Some("prev-url"));
    }

    #[test]
    fn test_help_text_lists_every_command() {
        let help = help_text();
        for (name, description) in COMMANDS {
            assert!(help.contains(name), "help should mention {}", name);
            assert!(help.contains(description));
        }
    }

    #[test]
    fn test_render_locations_one_name_per_line() {
        let page = LocationAreaPage {
            count: 2,
            next: None,
            previous: None,
            results: vec![named("canalave-city-area"), named("eterna-city-area")],
        };

        assert_eq!(
            render_locations(&page),
            "canalave-city-area\neterna-city-area\n"
        );
    }

    #[test]
    fn test_render_encounters_names_the_area() {
        let area = LocationArea {
            name: "pastoria-city-area".to_string(),
            pokemon_encounters: vec![
                PokemonEncounter {
                    pokemon: named("tentacool"),
                },
                PokemonEncounter {
                    pokemon: named("magikarp"),
                },
            ],
        };

        let out = render_encounters(&area);
        assert!(out.starts_with("Exploring pastoria-city-area...\n"));
        assert!(out.contains("Found Pokemon:\n"));
        assert!(out.contains(" - tentacool\n"));
        assert!(out.contains(" - magikarp\n"));
    }

    #[test]
    fn test_render_pokemon_details() {
        let out = render_pokemon_details(&sample_pokemon());
        assert!(out.contains("Name: pikachu\n"));
        assert!(out.contains("Height: 4\n"));
        assert!(out.contains("Weight: 60\n"));
        assert!(out.contains(" - hp: 35\n"));
        assert!(out.contains(" - attack: 55\n"));
        assert!(out.contains("Types:\n - electric\n"));
    }

    #[test]
    fn test_render_pokedex_sorted_names() {
        let mut caught = HashMap::new();
        caught.insert("pikachu".to_string(), sample_pokemon());
        caught.insert("magikarp".to_string(), sample_pokemon());

        let out = render_pokedex(&caught);
        assert_eq!(out, "Your Pokedex:\n - magikarp\n - pikachu\n");
    }

    #[test]
    fn test_attempt_catch_is_deterministic_per_seed() {
        let mut rng_a = StdRng::seed_from_u64(7);
        let mut rng_b = StdRng::seed_from_u64(7);
        for base_experience in [0, 36, 112, 635] {
            assert_eq!(
                attempt_catch(&mut rng_a, base_experience),
                attempt_catch(&mut rng_b, base_experience)
            );
        }
    }

    #[test]
    fn test_attempt_catch_harder_for_stronger_pokemon() {
        let trials = 2000;
        let mut rng = StdRng::seed_from_u64(42);
        let weak = (0..trials)
            .filter(|_| attempt_catch(&mut rng, 50))
            .count();
        let strong = (0..trials)
            .filter(|_| attempt_catch(&mut rng, 600))
            .count();

        assert!(weak > strong, "weak={} strong={}", weak, strong);
        // With base experience 600 the catch rate is roughly 40/600
        assert!(strong < trials / 4);
    }

    #[tokio::test]
    async fn test_dispatch_blank_line_is_ignored() {
        let mut app = App::new(Cache::new(Duration::from_secs(60)));
        assert!(app.dispatch("   ").await.is_ok());
        assert!(!app.should_quit);
    }

    #[tokio::test]
    async fn test_dispatch_exit_sets_quit_flag() {
        let mut app = App::new(Cache::new(Duration::from_secs(60)));
        app.dispatch("exit").await.expect("exit should succeed");
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_dispatch_unknown_command_errors() {
        let mut app = App::new(Cache::new(Duration::from_secs(60)));
        let err = app.dispatch("flee").await.unwrap_err();
        assert!(matches!(err, CommandError::Unknown(ref name) if name == "flee"));
    }

    #[tokio::test]
    async fn test_dispatch_explore_requires_argument() {
        let mut app = App::new(Cache::new(Duration::from_secs(60)));
        let err = app.dispatch("explore").await.unwrap_err();
        assert!(matches!(
            err,
            CommandError::MissingArgument {
                command: "explore",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_dispatch_catch_requires_argument() {
        let mut app = App::new(Cache::new(Duration::from_secs(60)));
        let err = app.dispatch("catch").await.unwrap_err();
        assert!(matches!(
            err,
            CommandError::MissingArgument {
                command: "catch",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_dispatch_inspect_unknown_pokemon_is_not_an_error() {
        let mut app = App::new(Cache::new(Duration::from_secs(60)));
        assert!(app.dispatch("inspect missingno").await.is_ok());
    }

    #[tokio::test]
    async fn test_mapb_on_first_page_resets_cursor() {
        let mut app = App::new(Cache::new(Duration::from_secs(60)));
        app.cursor.next = None;

        app.dispatch("mapb").await.expect("mapb should succeed");
        assert!(app.cursor.next.as_deref().unwrap().contains("offset=0"));
        assert!(app.cursor.previous.is_none());
    }
}
