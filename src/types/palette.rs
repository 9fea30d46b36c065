//! Palette type for named colour roles.
//!
//! A palette maps semantic role names (`outline`, `skin_shadow`, ...) to
//! colours. Palettes are scoped to one asset, or shared by the frames of
//! one character through a named palette document.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::error::{Result, SpriteError};

use super::Colour;

/// A collection of named colour roles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    /// Palette name
    pub name: String,

    /// Resolved role colours, ordered by role name
    colours: BTreeMap<String, Colour>,
}

impl Palette {
    /// Create a new empty palette.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            colours: BTreeMap::new(),
        }
    }

    /// Build a palette from literal `(role, colour)` pairs.
    pub fn from_colours<I, S>(name: impl Into<String>, colours: I) -> Self
    where
        I: IntoIterator<Item = (S, Colour)>,
        S: Into<String>,
    {
        let mut palette = Self::new(name);
        for (role, colour) in colours {
            palette.insert(role.into(), colour);
        }
        palette
    }

    /// Get a colour by role name. A leading `$` is ignored.
    pub fn get(&self, role: &str) -> Option<Colour> {
        let role = role.strip_prefix('$').unwrap_or(role);
        self.colours.get(role).copied()
    }

    /// Look up a role, failing if it is not defined.
    pub fn role(&self, role: &str) -> Result<Colour> {
        self.get(role).ok_or_else(|| {
            let role = role.strip_prefix('$').unwrap_or(role);
            SpriteError::Definition {
                message: format!("Undefined palette role '{}' in palette '{}'", role, self.name),
                help: Some(format!(
                    "Defined roles: {}",
                    self.role_names().collect::<Vec<_>>().join(", ")
                )),
            }
        })
    }

    /// Whether the palette defines a role.
    pub fn contains(&self, role: &str) -> bool {
        self.get(role).is_some()
    }

    /// All role names, in sorted order.
    pub fn role_names(&self) -> impl Iterator<Item = &str> {
        self.colours.keys().map(|s| s.as_str())
    }

    /// All `(role, colour)` pairs, in sorted role order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Colour)> {
        self.colours.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Get the number of roles.
    pub fn len(&self) -> usize {
        self.colours.len()
    }

    /// Check if the palette is empty.
    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }

    /// Insert a resolved colour.
    pub fn insert(&mut self, role: String, colour: Colour) {
        self.colours.insert(role, colour);
    }
}

/// Builder for constructing palettes from textual definitions.
///
/// Values may be hex colours (`#3B5998`), references to other roles
/// (`$hoodie`), or `lighten($role, N%)` / `darken($role, N%)`.
#[derive(Debug)]
pub struct PaletteBuilder {
    name: String,
    definitions: Vec<(String, ColourDef)>,
}

#[derive(Debug, Clone, PartialEq)]
enum ColourDef {
    Hex(String),
    Reference(String),
    Lighten(String, f32),
    Darken(String, f32),
}

impl PaletteBuilder {
    /// Create a new palette builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            definitions: Vec::new(),
        }
    }

    /// Add a role definition.
    pub fn define(&mut self, role: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let role = role.into();
        let def = parse_colour_def(&value.into())?;
        self.definitions.push((role, def));
        Ok(())
    }

    /// Build the palette, resolving all references.
    ///
    /// Every referenced role must be defined in this builder.
    pub fn build(self) -> Result<Palette> {
        let mut palette = Palette::new(self.name.clone());

        let defs: HashMap<&str, &ColourDef> = self
            .definitions
            .iter()
            .map(|(name, def)| (name.as_str(), def))
            .collect();

        let mut resolved: HashMap<String, Colour> = HashMap::new();
        let mut resolving: HashSet<String> = HashSet::new();

        for (name, _) in &self.definitions {
            let colour = resolve_single(name, &defs, &palette, &mut resolved, &mut resolving)?;
            palette.insert(name.clone(), colour);
        }

        Ok(palette)
    }
}

/// Parse a colour value string into a ColourDef.
fn parse_colour_def(value: &str) -> Result<ColourDef> {
    let value = value.trim();

    if let Some(args) = function_args(value, "lighten") {
        let (role, amount) = parse_adjust_args(value, args)?;
        return Ok(ColourDef::Lighten(role, amount));
    }
    if let Some(args) = function_args(value, "darken") {
        let (role, amount) = parse_adjust_args(value, args)?;
        return Ok(ColourDef::Darken(role, amount));
    }

    match value.strip_prefix('$') {
        Some(role) => Ok(ColourDef::Reference(role.to_string())),
        None => Ok(ColourDef::Hex(value.to_string())),
    }
}

/// Return the argument text of `name(...)`, if `value` is such a call.
fn function_args<'a>(value: &'a str, name: &str) -> Option<&'a str> {
    value
        .strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

/// Parse `$role, 20%` into its parts.
fn parse_adjust_args(value: &str, args: &str) -> Result<(String, f32)> {
    let err = || SpriteError::Parse {
        message: format!("Invalid colour expression: {}", value),
        help: Some("Use lighten($role, 20%) or darken($role, 20%)".to_string()),
    };

    let (role, amount) = args.split_once(',').ok_or_else(err)?;
    let role = role.trim().strip_prefix('$').ok_or_else(err)?;
    let amount: f32 = amount
        .trim()
        .trim_end_matches('%')
        .trim()
        .parse()
        .map_err(|_| err())?;

    Ok((role.to_string(), amount))
}

/// Resolve a single role definition, detecting cycles.
fn resolve_single(
    name: &str,
    definitions: &HashMap<&str, &ColourDef>,
    existing: &Palette,
    resolved: &mut HashMap<String, Colour>,
    resolving: &mut HashSet<String>,
) -> Result<Colour> {
    if let Some(&colour) = resolved.get(name) {
        return Ok(colour);
    }

    if resolving.contains(name) {
        return Err(SpriteError::Parse {
            message: format!("Circular colour reference: ${}", name),
            help: Some("Check your palette for roles that refer to each other".to_string()),
        });
    }

    let def = match definitions.get(name) {
        Some(def) => *def,
        None => return existing.role(name),
    };

    resolving.insert(name.to_string());

    let colour = match def {
        ColourDef::Hex(hex) => Colour::from_hex(hex)?,
        ColourDef::Reference(role) => {
            resolve_single(role, definitions, existing, resolved, resolving)?
        }
        ColourDef::Lighten(role, amount) => {
            resolve_single(role, definitions, existing, resolved, resolving)?.lighten(*amount)
        }
        ColourDef::Darken(role, amount) => {
            resolve_single(role, definitions, existing, resolved, resolving)?.darken(*amount)
        }
    };

    resolving.remove(name);
    resolved.insert(name.to_string(), colour);

    Ok(colour)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_new() {
        let palette = Palette::new("test");
        assert_eq!(palette.name, "test");
        assert!(palette.is_empty());
    }

    #[test]
    fn test_palette_get_with_dollar() {
        let palette = Palette::from_colours("p", [("outline", Colour::BLACK)]);
        assert_eq!(palette.get("$outline"), Some(Colour::BLACK));
        assert_eq!(palette.get("outline"), Some(Colour::BLACK));
    }

    #[test]
    fn test_role_is_fail_fast() {
        let palette = Palette::from_colours("player", [("skin", Colour::WHITE)]);
        assert_eq!(palette.role("skin").unwrap(), Colour::WHITE);

        let err = palette.role("$hair").unwrap_err();
        assert!(err.to_string().contains("hair"));
        assert!(err.to_string().contains("player"));
    }

    #[test]
    fn test_role_names_sorted() {
        let palette = Palette::from_colours(
            "p",
            [("rim", Colour::WHITE), ("body", Colour::BLACK), ("shadow", Colour::BLACK)],
        );
        assert_eq!(palette.role_names().collect::<Vec<_>>(), vec!["body", "rim", "shadow"]);
    }

    #[test]
    fn test_builder_hex_colours() {
        let mut builder = PaletteBuilder::new("test");
        builder.define("red", "#FF0000").unwrap();
        builder.define("green", "#00FF00").unwrap();

        let palette = builder.build().unwrap();

        assert_eq!(palette.get("red"), Some(Colour::rgb(255, 0, 0)));
        assert_eq!(palette.get("green"), Some(Colour::rgb(0, 255, 0)));
    }

    #[test]
    fn test_builder_chained_references() {
        let mut builder = PaletteBuilder::new("test");
        builder.define("accent", "$primary").unwrap();
        builder.define("primary", "$base").unwrap();
        builder.define("base", "#FF0000").unwrap();

        let palette = builder.build().unwrap();

        assert_eq!(palette.get("accent"), Some(Colour::rgb(255, 0, 0)));
    }

    #[test]
    fn test_builder_circular_reference() {
        let mut builder = PaletteBuilder::new("test");
        builder.define("a", "$b").unwrap();
        builder.define("b", "$a").unwrap();

        assert!(builder.build().is_err());
    }

    #[test]
    fn test_builder_undefined_reference() {
        let mut builder = PaletteBuilder::new("test");
        builder.define("a", "$missing").unwrap();

        let err = builder.build().unwrap_err();
        assert!(err.to_string().contains("'missing'"));
    }

    #[test]
    fn test_builder_uses_only_its_own_roles() {
        let mut builder = PaletteBuilder::new("hoodie");
        builder.define("edge", "#101010").unwrap();

        let palette = builder.build().unwrap();

        assert_eq!(palette.len(), 1);
        assert!(!palette.contains("outline"));
    }

    #[test]
    fn test_builder_lighten_darken() {
        let mut builder = PaletteBuilder::new("test");
        builder.define("base", "#808080").unwrap();
        builder.define("hi", "lighten($base, 25%)").unwrap();
        builder.define("lo", "darken($base, 25%)").unwrap();

        let palette = builder.build().unwrap();
        let base = palette.get("base").unwrap();

        assert!(palette.get("hi").unwrap().r > base.r);
        assert!(palette.get("lo").unwrap().r < base.r);
    }

    #[test]
    fn test_builder_bad_expression() {
        let mut builder = PaletteBuilder::new("test");
        assert!(builder.define("x", "lighten(base)").is_err());
        assert!(builder.define("y", "darken($base, lots)").is_err());
    }
}
