//! Interactive terminal shell.
//!
//! Reads path-style commands (`/sorts`, `/sorts/abc123/edit`, ...), owns
//! the locale selection and the identity session, and dispatches to the
//! view-models. Actions with no route of their own (language toggle,
//! logout, quit) are plain verbs.

use std::io::Write as _;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines};
use tokio::sync::Mutex;

use grimoire_auth::IdentityGateway;
use grimoire_client::SpellApi;
use grimoire_core::i18n::{self, Locale};
use grimoire_core::spell::{Category, Spell, SpellFilters};
use grimoire_core::validation::SpellForm;

use crate::config::AppConfig;
use crate::routes::Route;
use crate::views::detail::{Confirm, DeleteOutcome, DetailState, DetailView};
use crate::views::form::{submit, FormMode, SubmitOutcome};
use crate::views::list::{ListState, ListView};
use crate::views::login::{sign_in, LoginOutcome};

/// Parse list filters from a URL-style query string
/// (`categorie=Offensif&estInterdit=true`). Unknown keys and values are
/// ignored, leaving that filter unset.
pub fn parse_filters(query: &str) -> SpellFilters {
    let mut filters = SpellFilters::default();
    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        match key {
            "categorie" => filters.category = Category::parse(value),
            "estInterdit" => {
                filters.forbidden = match value {
                    "true" => Some(true),
                    "false" => Some(false),
                    _ => None,
                }
            }
            _ => {}
        }
    }
    filters
}

/// One buffered reader shared for the whole session. The reader's
/// buffer may hold several lines at once (piped input, a multi-line
/// paste); rebuilding it per prompt would drop everything past the
/// first line.
#[derive(Clone)]
struct Input {
    lines: Arc<Mutex<Lines<BufReader<Box<dyn AsyncRead + Send + Unpin>>>>>,
}

impl Input {
    fn stdin() -> Self {
        Self::from_reader(tokio::io::stdin())
    }

    fn from_reader(reader: impl AsyncRead + Send + Unpin + 'static) -> Self {
        let reader: Box<dyn AsyncRead + Send + Unpin> = Box::new(reader);
        Self {
            lines: Arc::new(Mutex::new(BufReader::new(reader).lines())),
        }
    }

    /// Read one line after printing a prompt. `None` means EOF.
    async fn read_line(&self, prompt: &str) -> anyhow::Result<Option<String>> {
        print!("{prompt}");
        std::io::stdout().flush()?;
        Ok(self.lines.lock().await.next_line().await?)
    }
}

/// Confirmation gate for destructive actions, backed by the shared
/// input handle.
struct PromptConfirm {
    input: Input,
}

#[async_trait]
impl Confirm for PromptConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        match self.input.read_line(&format!("{prompt} [o/N] ")).await {
            Ok(Some(answer)) => matches!(
                answer.trim().to_ascii_lowercase().as_str(),
                "o" | "oui" | "y" | "yes"
            ),
            _ => false,
        }
    }
}

/// The running shell: one API client, one identity session, one locale.
pub struct Shell {
    api: SpellApi,
    gateway: IdentityGateway,
    locale: Locale,
    list: ListView,
    /// Where a successful login should navigate back to.
    return_to: Option<Route>,
    input: Input,
}

impl Shell {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            api: SpellApi::new(config.api_base_url.clone()),
            gateway: IdentityGateway::new(
                config.auth_base_url.clone(),
                config.auth_api_key.clone(),
            ),
            locale: config.locale,
            list: ListView::new(),
            return_to: None,
            input: Input::stdin(),
        }
    }

    fn text<'a>(&self, key: &'a str) -> &'a str {
        i18n::message(self.locale, key)
    }

    fn line(&self, key: &str, args: &[(&str, &str)]) -> String {
        i18n::format(self.locale, key, args)
    }

    /// Read commands until EOF or `quit`.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        println!("=== {} ===", self.text("app.title"));
        self.render_home();

        loop {
            let Some(command) = self.input.read_line("> ").await? else {
                break;
            };
            let command = command.trim().to_string();

            match command.as_str() {
                "" => continue,
                "quit" | "exit" => break,
                "lang" => {
                    self.locale = self.locale.toggle();
                    println!("[{}]", self.locale.as_str());
                }
                "logout" => {
                    self.gateway.sign_out();
                    println!("{}", self.text("logout.success"));
                }
                _ => {
                    let (path, query) = command.split_once('?').unwrap_or((command.as_str(), ""));
                    let mut next = Some((Route::parse(path), query.to_string()));
                    // Follow navigation until a view settles.
                    while let Some((route, query)) = next.take() {
                        next = self
                            .dispatch(route, &query)
                            .await?
                            .map(|route| (route, String::new()));
                    }
                }
            }
        }
        Ok(())
    }

    /// Render one route. Returns a follow-up route when the view
    /// navigated somewhere else (saved, deleted, signed in, redirected).
    async fn dispatch(&mut self, route: Route, query: &str) -> anyhow::Result<Option<Route>> {
        match route {
            Route::Home => {
                self.render_home();
                Ok(None)
            }
            Route::Login => self.login_flow().await,
            Route::Spells => {
                self.list_flow(parse_filters(query)).await;
                Ok(None)
            }
            Route::AddSpell => self.form_flow(FormMode::Create, SpellForm::default()).await,
            Route::SpellDetails { id } => self.detail_flow(id).await,
            Route::EditSpell { id } => self.edit_flow(id).await,
            Route::NotFound => {
                println!("{}", self.text("notfound.message"));
                Ok(None)
            }
        }
    }

    fn render_home(&self) {
        println!("{}", self.text("homepage.welcome"));
        println!("{}", self.text("homepage.subtitle"));
        println!("{} : /sorts", self.text("homepage.viewSorts"));
    }

    // ---- list ----

    async fn list_flow(&mut self, filters: SpellFilters) {
        println!("-- {} --", self.text("sorts.list.title"));
        println!("{}", self.text("loading.list"));

        self.list.refresh(&self.api, filters).await;

        match self.list.state() {
            ListState::Loaded(spells) => {
                if let Some(empty) = self.list.empty_state() {
                    println!("{}", self.text(empty.message_key()));
                } else {
                    for spell in spells {
                        let category = self.text(spell.category.message_key());
                        println!(
                            "  {}  {}  ({})",
                            spell.id,
                            spell.name,
                            self.line("sortList.category", &[("category", category)])
                        );
                    }
                }
            }
            ListState::Error(message) => {
                println!("{}", self.line("message.error.generic", &[("error", message)]));
            }
            // list_flow always applies its own response.
            ListState::Idle | ListState::Loading => {}
        }
    }

    // ---- details / delete ----

    async fn detail_flow(&mut self, id: String) -> anyhow::Result<Option<Route>> {
        println!("{}", self.text("loading.details"));

        let mut view = DetailView::new(id);
        view.load(&self.api).await;

        let spell = match view.state() {
            DetailState::Loaded(spell) => spell.clone(),
            DetailState::Error(message) => {
                println!("-- {} --", self.text("sort.details.title"));
                println!("{}", self.line("message.error.generic", &[("error", message)]));
                println!("{} : /sorts", self.text("button.backToList"));
                return Ok(None);
            }
            DetailState::Loading => return Ok(None),
        };

        self.render_spell(&spell);
        println!(
            "[{} = edit | {} = delete]",
            self.text("button.edit"),
            self.text("button.delete")
        );

        let Some(action) = self.input.read_line("? ").await? else {
            return Ok(None);
        };
        match action.trim() {
            "edit" => Ok(Some(Route::EditSpell {
                id: view.id().to_string(),
            })),
            "delete" => {
                let prompt = self.text("delete.confirmation").to_string();
                let confirm = PromptConfirm {
                    input: self.input.clone(),
                };
                let outcome = self
                    .delete_with_confirmation(&view, &confirm, &prompt)
                    .await;
                match outcome {
                    DeleteOutcome::RedirectToLogin => {
                        println!("{}", self.text("delete.loginRequired"));
                        self.return_to = Some(Route::SpellDetails {
                            id: view.id().to_string(),
                        });
                        Ok(Some(Route::Login))
                    }
                    DeleteOutcome::Cancelled => {
                        println!("{}", self.text("delete.cancelled"));
                        Ok(None)
                    }
                    DeleteOutcome::Deleted => {
                        println!("{}", self.text("delete.success"));
                        Ok(Some(Route::Spells))
                    }
                    DeleteOutcome::Failed(message) => {
                        println!(
                            "{}",
                            self.line("message.error.generic", &[("error", &message)])
                        );
                        Ok(None)
                    }
                }
            }
            _ => Ok(None),
        }
    }

    async fn delete_with_confirmation(
        &self,
        view: &DetailView,
        confirm: &dyn Confirm,
        prompt: &str,
    ) -> DeleteOutcome {
        view.delete(&self.api, &self.gateway, confirm, prompt).await
    }

    fn render_spell(&self, spell: &Spell) {
        println!("== {} ==", spell.name);
        let category = self.text(spell.category.message_key());
        println!(
            "{}",
            self.line("sort.details.category", &[("category", category)])
        );
        println!(
            "{}",
            self.line(
                "sort.details.description",
                &[("description", &spell.description)]
            )
        );
        println!(
            "{}",
            self.line(
                "sort.details.difficulty",
                &[("difficulty", &spell.difficulty.to_string())]
            )
        );
        println!(
            "{}",
            self.line("sort.details.power", &[("power", &spell.power.to_string())])
        );
        let tags = if spell.tags.is_empty() {
            self.text("sort.details.noTags").to_string()
        } else {
            spell.tags.join(", ")
        };
        println!("{}", self.line("sort.details.tags", &[("tags", &tags)]));
        let forbidden = if spell.forbidden {
            self.text("sort.details.yes")
        } else {
            self.text("sort.details.no")
        };
        println!(
            "{}",
            self.line("sort.details.isForbidden", &[("isForbidden", forbidden)])
        );
    }

    // ---- create / edit ----

    async fn edit_flow(&mut self, id: String) -> anyhow::Result<Option<Route>> {
        println!("{}", self.text("loading.details"));

        let mut view = DetailView::new(id.clone());
        view.load(&self.api).await;

        match view.state() {
            DetailState::Loaded(spell) => {
                let form = SpellForm::from_spell(spell);
                let mode = FormMode::Edit {
                    id,
                    created_at: spell.created_at.clone(),
                };
                self.form_flow(mode, form).await
            }
            DetailState::Error(message) => {
                println!("{}", self.line("message.error.generic", &[("error", message)]));
                Ok(None)
            }
            DetailState::Loading => Ok(None),
        }
    }

    /// Prompt for every field, submit, and re-present the form on
    /// validation or server failure, so the form effectively stays
    /// visible. Typing `cancel` at any prompt aborts to the list.
    async fn form_flow(
        &mut self,
        mode: FormMode,
        mut form: SpellForm,
    ) -> anyhow::Result<Option<Route>> {
        loop {
            let filled = self.fill_form(&form).await?;
            form = match filled {
                Some(form) => form,
                None => return Ok(Some(Route::Spells)),
            };

            match submit(&self.api, &form, mode.clone()).await {
                SubmitOutcome::Saved(route) => {
                    println!("{}", self.text("message.saved"));
                    return Ok(Some(route));
                }
                SubmitOutcome::Invalid(errors) => {
                    for (field, code) in errors.iter() {
                        println!("  {}: {}", field.as_str(), self.text(code));
                    }
                }
                SubmitOutcome::Failed(message) => {
                    println!(
                        "{}",
                        self.line("message.error.generic", &[("error", &message)])
                    );
                }
            }
        }
    }

    /// Prompt for each form field, keeping the current value on empty
    /// input. Returns `None` when the user cancels.
    async fn fill_form(&self, current: &SpellForm) -> anyhow::Result<Option<SpellForm>> {
        let mut form = current.clone();

        let Some(name) = self.prompt("form.name", &form.name).await? else {
            return Ok(None);
        };
        form.name = name;

        println!(
            "{} : {}",
            self.text("form.selectCategory"),
            Category::ALL
                .iter()
                .map(|category| category.as_wire())
                .collect::<Vec<_>>()
                .join(" | ")
        );
        let Some(category) = self.prompt("form.category", &form.category).await? else {
            return Ok(None);
        };
        form.category = category;

        let Some(description) = self.prompt("form.description", &form.description).await? else {
            return Ok(None);
        };
        form.description = description;

        let Some(difficulty) = self
            .prompt("form.difficulty", &form.difficulty.to_string())
            .await?
        else {
            return Ok(None);
        };
        // Unparseable numbers become 0 and fail range validation.
        form.difficulty = difficulty.trim().parse().unwrap_or(0);

        let Some(power) = self.prompt("form.power", &form.power.to_string()).await? else {
            return Ok(None);
        };
        form.power = power.trim().parse().unwrap_or(0);

        let Some(tags) = self.prompt("form.tags", &form.tags).await? else {
            return Ok(None);
        };
        form.tags = tags;

        let default = if form.forbidden { "form.yes" } else { "form.no" };
        let Some(forbidden) = self
            .prompt("form.isForbidden", self.text(default))
            .await?
        else {
            return Ok(None);
        };
        if !forbidden.is_empty() {
            form.forbidden = matches!(
                forbidden.trim().to_ascii_lowercase().as_str(),
                "o" | "oui" | "y" | "yes" | "true"
            );
        }

        Ok(Some(form))
    }

    /// One labeled prompt. Empty input keeps `current`; `cancel` aborts.
    async fn prompt(&self, label_key: &str, current: &str) -> anyhow::Result<Option<String>> {
        let label = self.text(label_key);
        let prompt = if current.is_empty() {
            format!("{label}: ")
        } else {
            format!("{label} [{current}]: ")
        };

        match self.input.read_line(&prompt).await? {
            None => Ok(None),
            Some(input) if input.trim() == "cancel" => Ok(None),
            Some(input) if input.is_empty() => Ok(Some(current.to_string())),
            Some(input) => Ok(Some(input)),
        }
    }

    // ---- login ----

    async fn login_flow(&mut self) -> anyhow::Result<Option<Route>> {
        println!("-- {} --", self.text("login.title"));

        let Some(email) = self
            .input
            .read_line(&format!("{}: ", self.text("login.email")))
            .await?
        else {
            return Ok(None);
        };
        let Some(password) = self
            .input
            .read_line(&format!("{}: ", self.text("login.password")))
            .await?
        else {
            return Ok(None);
        };

        let return_to = self.return_to.take().unwrap_or(Route::Home);
        match sign_in(&self.gateway, email.trim(), &password, return_to).await {
            LoginOutcome::Invalid(errors) => {
                for code in errors.values() {
                    println!("  {}", self.text(code));
                }
                Ok(None)
            }
            LoginOutcome::Failed(message) => {
                println!("{} {}", self.text("login.errors.general"), message);
                Ok(None)
            }
            LoginOutcome::SignedIn(route) => {
                let email = self
                    .gateway
                    .current_user()
                    .map(|user| user.email)
                    .unwrap_or_default();
                println!("{}", self.line("login.success", &[("email", &email)]));
                Ok(Some(route))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_means_no_filters() {
        assert_eq!(parse_filters(""), SpellFilters::default());
    }

    #[test]
    fn category_filter_parses() {
        let filters = parse_filters("categorie=Offensif");
        assert_eq!(filters.category, Some(Category::Offensive));
        assert_eq!(filters.forbidden, None);
    }

    #[test]
    fn forbidden_tri_state_parses() {
        assert_eq!(parse_filters("estInterdit=true").forbidden, Some(true));
        assert_eq!(parse_filters("estInterdit=false").forbidden, Some(false));
        assert_eq!(parse_filters("estInterdit=peut-etre").forbidden, None);
    }

    #[test]
    fn both_filters_parse_together() {
        let filters = parse_filters("categorie=Curatif&estInterdit=false");
        assert_eq!(filters.category, Some(Category::Curative));
        assert_eq!(filters.forbidden, Some(false));
    }

    #[test]
    fn unknown_keys_and_categories_are_ignored() {
        let filters = parse_filters("tri=nom&categorie=Invalide");
        assert_eq!(filters, SpellFilters::default());
    }

    #[tokio::test]
    async fn input_yields_every_buffered_line() {
        let input = Input::from_reader(&b"first\nsecond\nthird\n"[..]);

        assert_eq!(input.read_line("").await.unwrap().as_deref(), Some("first"));
        assert_eq!(input.read_line("").await.unwrap().as_deref(), Some("second"));
        assert_eq!(input.read_line("").await.unwrap().as_deref(), Some("third"));
        assert_eq!(input.read_line("").await.unwrap(), None);
    }

    // All buffered commands must reach the loop, even when they arrive
    // in one burst (piped input, a multi-line paste).
    #[tokio::test]
    async fn piped_commands_all_reach_the_loop() {
        let mut shell = Shell {
            api: SpellApi::new("http://127.0.0.1:9/api"),
            gateway: IdentityGateway::new("http://127.0.0.1:9/v1", "test-key"),
            locale: Locale::Fr,
            list: ListView::new(),
            return_to: None,
            input: Input::from_reader(&b"lang\nlang\nquit\n"[..]),
        };

        shell.run().await.expect("run until quit");

        // Two toggles: fr -> en -> fr. Dropping buffered lines would
        // leave the locale at en after the first toggle.
        assert_eq!(shell.locale, Locale::Fr);
    }
}
