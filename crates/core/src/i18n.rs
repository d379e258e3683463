//! Bilingual message catalog with `{placeholder}` interpolation.
//!
//! French is the primary locale; English overlays it. Lookup falls
//! back locale, then French, then the
//! key itself, so a missing entry renders visibly instead of panicking.
//! Validation error codes (`form.errors.*`, `login.errors.*`) are keys in
//! this catalog, which is why the validation layer emits them verbatim.

/// Supported UI locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    /// French (the default).
    #[default]
    Fr,
    /// English.
    En,
}

impl Locale {
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::Fr => "fr",
            Locale::En => "en",
        }
    }

    /// Parse a locale label, tolerant of case and region tags
    /// (`fr-CA` → French). Unknown labels yield `None`.
    pub fn parse(value: &str) -> Option<Locale> {
        let normalized = value.trim().to_ascii_lowercase();
        if normalized.starts_with("fr") {
            Some(Locale::Fr)
        } else if normalized.starts_with("en") {
            Some(Locale::En)
        } else {
            None
        }
    }

    /// The other locale; the shell's language toggle.
    pub fn toggle(self) -> Locale {
        match self {
            Locale::Fr => Locale::En,
            Locale::En => Locale::Fr,
        }
    }
}

/// Look up a catalog entry, falling back French → key.
pub fn message<'a>(locale: Locale, key: &'a str) -> &'a str {
    let table = match locale {
        Locale::Fr => french(key),
        Locale::En => english(key).or_else(|| french(key)),
    };
    table.unwrap_or(key)
}

/// Render a catalog entry, substituting `{name}` placeholders with the
/// given argument values. Unknown placeholders are left in place.
pub fn format(locale: Locale, key: &str, args: &[(&str, &str)]) -> String {
    let mut out = message(locale, key).to_string();
    for (name, value) in args {
        out = out.replace(&format!("{{{name}}}"), value);
    }
    out
}

fn french(key: &str) -> Option<&'static str> {
    let text = match key {
        "app.title" => "Gestion des sorts",
        "button.home" => "Accueil",
        "button.login" => "Connexion",
        "button.logout" => "Déconnexion",
        "homepage.welcome" => "Bienvenue dans le gestionnaire de sortilèges !",
        "homepage.subtitle" => {
            "Projet réalisé dans le cadre du cours de Développement Web 3 | Hiver 2024"
        }
        "homepage.viewSorts" => "Voir la liste des sorts",

        "login.title" => "S'authentifier",
        "login.email" => "Courriel",
        "login.password" => "Mot de passe",
        "login.submit" => "S'authentifier",
        "login.cancel" => "Annuler",
        "login.errors.general" => "Une erreur est survenue.",
        "login.errors.missingEmail" => "Le courriel est requis.",
        "login.errors.invalidEmail" => "Le courriel est invalide.",
        "login.errors.missingPassword" => "Le mot de passe est requis.",
        "login.errors.shortPassword" => "Le mot de passe doit contenir au moins 6 caractères.",
        "login.success" => "Connecté en tant que {email}.",
        "logout.success" => "Utilisateur déconnecté avec succès.",

        "form.name" => "Nom",
        "form.category" => "Catégorie",
        "form.selectCategory" => "Sélectionnez une catégorie",
        "form.description" => "Description",
        "form.difficulty" => "Niveau de difficulté",
        "form.power" => "Puissance",
        "form.tags" => "Tags (séparés par des virgules)",
        "form.isForbidden" => "Est interdit",
        "form.yes" => "Oui",
        "form.no" => "Non",
        "form.submit" => "Soumettre",
        "form.errors.name" => "Vous devez fournir un nom valide (au moins 3 caractères).",
        "form.errors.category" => "Veuillez sélectionner une catégorie.",
        "form.errors.invalidCategory" => "La catégorie sélectionnée est invalide.",
        "form.errors.description" => {
            "Veuillez fournir une description valide (au moins 3 caractères)."
        }
        "form.errors.difficulty" => "Le niveau de difficulté doit être entre 1 et 10.",
        "form.errors.power" => "La puissance doit être entre 1 et 10.",
        "form.errors.tags" => "Chaque tag doit contenir au moins un caractère.",

        "category.curatif" => "Curatif",
        "category.offensif" => "Offensif",
        "category.defensif" => "Défensif",
        "category.utilitaire" => "Utilitaire",

        "sorts.list.title" => "Liste des Sorts",
        "sorts.list.empty" => "Aucun sort n'existe dans la base de données.",
        "sorts.list.noFilters" => "Aucun sort ne correspond aux filtres sélectionnés.",
        "sortList.category" => "Catégorie : {category}",
        "button.addSort" => "Ajouter un nouveau sort",
        "filter.allCategories" => "Toutes les catégories",
        "filter.showInterdits" => "Interdits",
        "filter.showNonInterdits" => "Non Interdits",

        "sort.details.title" => "Détails du Sort",
        "sort.details.category" => "Catégorie : {category}",
        "sort.details.description" => "Description : {description}",
        "sort.details.difficulty" => "Niveau de difficulté : {difficulty}",
        "sort.details.power" => "Puissance : {power}",
        "sort.details.tags" => "Tags : {tags}",
        "sort.details.noTags" => "Aucun tag",
        "sort.details.isForbidden" => "Est interdit : {isForbidden}",
        "sort.details.yes" => "Oui",
        "sort.details.no" => "Non",

        "button.edit" => "Modifier",
        "button.delete" => "Supprimer",
        "button.backToList" => "Retour à la liste des sorts",
        "delete.confirmation" => {
            "Êtes-vous sûr de vouloir supprimer ce sort ? Cette action est irréversible."
        }
        "delete.success" => "Le sort a été supprimé.",
        "delete.cancelled" => "Suppression annulée.",
        "delete.loginRequired" => "Vous devez être connecté pour supprimer un sort.",

        "loading.list" => "Chargement des sorts...",
        "loading.details" => "Chargement des détails...",
        "message.error.generic" => "Erreur : {error}",
        "message.saved" => "Le sort a été enregistré.",
        "notfound.message" => "Page introuvable.",

        _ => return None,
    };
    Some(text)
}

fn english(key: &str) -> Option<&'static str> {
    let text = match key {
        "app.title" => "Spell Manager",
        "button.home" => "Home",
        "button.login" => "Log in",
        "button.logout" => "Log out",
        "homepage.welcome" => "Welcome to the spell manager!",
        "homepage.subtitle" => "Project built for the Web Development 3 course | Winter 2024",
        "homepage.viewSorts" => "View the spell list",

        "login.title" => "Sign in",
        "login.email" => "Email",
        "login.password" => "Password",
        "login.submit" => "Sign in",
        "login.cancel" => "Cancel",
        "login.errors.general" => "An error occurred.",
        "login.errors.missingEmail" => "Email is required.",
        "login.errors.invalidEmail" => "Email is invalid.",
        "login.errors.missingPassword" => "Password is required.",
        "login.errors.shortPassword" => "Password must be at least 6 characters long.",
        "login.success" => "Signed in as {email}.",
        "logout.success" => "Signed out successfully.",

        "form.name" => "Name",
        "form.category" => "Category",
        "form.selectCategory" => "Select a category",
        "form.description" => "Description",
        "form.difficulty" => "Difficulty level",
        "form.power" => "Power",
        "form.tags" => "Tags (comma-separated)",
        "form.isForbidden" => "Is forbidden",
        "form.yes" => "Yes",
        "form.no" => "No",
        "form.submit" => "Submit",
        "form.errors.name" => "You must provide a valid name (at least 3 characters).",
        "form.errors.category" => "Please select a category.",
        "form.errors.invalidCategory" => "The selected category is invalid.",
        "form.errors.description" => "Please provide a valid description (at least 3 characters).",
        "form.errors.difficulty" => "Difficulty level must be between 1 and 10.",
        "form.errors.power" => "Power must be between 1 and 10.",
        "form.errors.tags" => "Each tag must contain at least one character.",

        "category.curatif" => "Curative",
        "category.offensif" => "Offensive",
        "category.defensif" => "Defensive",
        "category.utilitaire" => "Utility",

        "sorts.list.title" => "Spell List",
        "sorts.list.empty" => "No spell exists in the database.",
        "sorts.list.noFilters" => "No spell matches the selected filters.",
        "sortList.category" => "Category: {category}",
        "button.addSort" => "Add a new spell",
        "filter.allCategories" => "All categories",
        "filter.showInterdits" => "Forbidden",
        "filter.showNonInterdits" => "Not forbidden",

        "sort.details.title" => "Spell Details",
        "sort.details.category" => "Category: {category}",
        "sort.details.description" => "Description: {description}",
        "sort.details.difficulty" => "Difficulty level: {difficulty}",
        "sort.details.power" => "Power: {power}",
        "sort.details.tags" => "Tags: {tags}",
        "sort.details.noTags" => "No tags",
        "sort.details.isForbidden" => "Forbidden: {isForbidden}",
        "sort.details.yes" => "Yes",
        "sort.details.no" => "No",

        "button.edit" => "Edit",
        "button.delete" => "Delete",
        "button.backToList" => "Back to the spell list",
        "delete.confirmation" => {
            "Are you sure you want to delete this spell? This action is irreversible."
        }
        "delete.success" => "The spell has been deleted.",
        "delete.cancelled" => "Deletion cancelled.",
        "delete.loginRequired" => "You must be signed in to delete a spell.",

        "loading.list" => "Loading spells...",
        "loading.details" => "Loading details...",
        "message.error.generic" => "Error: {error}",
        "message.saved" => "The spell has been saved.",
        "notfound.message" => "Page not found.",

        _ => return None,
    };
    Some(text)
}
