use super::{color::Color, error::PaletteError};

/// Name of the working palette that picks are collected into.
pub const PICKER_PALETTE_NAME: &str = "PickerPalette";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Palette {
    name: String,
    colors: Vec<Color>,
    active: Option<usize>,
    /// Kept palettes survive the session; the working palette is not kept.
    pub keep: bool,
}

impl Palette {
    pub fn new(name: impl Into<String>) -> Self {
        Palette {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Appends an opaque copy of `color`, clamped to [0,1], and makes it the
    /// active entry.
    pub fn add(&mut self, color: Color) -> usize {
        self.colors.push(color.clamped().opaque());
        let index = self.colors.len() - 1;
        self.active = Some(index);
        index
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn active_color(&self) -> Option<&Color> {
        self.active.and_then(|i| self.colors.get(i))
    }

    pub fn set_active(&mut self, index: usize) -> Result<(), PaletteError> {
        if index >= self.colors.len() {
            return Err(PaletteError::ActiveOutOfRange(index));
        }
        self.active = Some(index);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.colors.clear();
        self.active = None;
    }
}

/// Every palette of a session, in creation order, with unique names.
#[derive(Debug, Clone, Default)]
pub struct PaletteLibrary {
    palettes: Vec<Palette>,
}

impl PaletteLibrary {
    pub fn new() -> Self {
        PaletteLibrary::default()
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.palettes.iter().map(Palette::name)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.palettes.iter().position(|p| p.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&Palette> {
        self.palettes.iter().find(|p| p.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Palette> {
        self.palettes.iter_mut().find(|p| p.name == name)
    }

    fn get_mut_or_err(&mut self, name: &str) -> Result<&mut Palette, PaletteError> {
        self.get_mut(name)
            .ok_or_else(|| PaletteError::NotFound(name.to_string()))
    }

    /// `name` if free, otherwise the first free `name.001`, `name.002`, ...
    pub fn unique_name(&self, name: &str) -> String {
        if self.position(name).is_none() {
            return name.to_string();
        }

        (1..)
            .map(|i| format!("{}.{:03}", name, i))
            .find(|candidate| self.position(candidate).is_none())
            .unwrap_or_else(|| name.to_string())
    }

    /// Creates an empty palette, renaming it if `name` is taken.
    pub fn create(&mut self, name: &str) -> &mut Palette {
        let palette = Palette::new(self.unique_name(name));
        let index = self.palettes.len();
        self.palettes.push(palette);
        &mut self.palettes[index]
    }

    pub fn get_or_create(&mut self, name: &str) -> &mut Palette {
        match self.position(name) {
            Some(index) => &mut self.palettes[index],
            None => self.create(name),
        }
    }

    pub fn clear(&mut self, name: &str) -> Result<(), PaletteError> {
        self.get_mut_or_err(name)?.clear();
        Ok(())
    }

    /// Copies `source` under `new_name` as a kept palette and returns the
    /// name it was stored under.
    pub fn copy_as(&mut self, source: &str, new_name: &str) -> Result<String, PaletteError> {
        if new_name.is_empty() {
            return Err(PaletteError::EmptyName);
        }

        let mut copy = self
            .get(source)
            .cloned()
            .ok_or_else(|| PaletteError::NotFound(source.to_string()))?;
        copy.name = self.unique_name(new_name);
        copy.keep = true;

        let name = copy.name.clone();
        self.palettes.push(copy);
        Ok(name)
    }

    pub fn append(&mut self, name: &str, color: Color) -> Result<usize, PaletteError> {
        Ok(self.get_mut_or_err(name)?.add(color))
    }

    pub fn active_color(&self, name: &str) -> Result<Option<&Color>, PaletteError> {
        self.get(name)
            .map(Palette::active_color)
            .ok_or_else(|| PaletteError::NotFound(name.to_string()))
    }

    pub fn set_active(&mut self, name: &str, index: usize) -> Result<(), PaletteError> {
        self.get_mut_or_err(name)?.set_active(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Color {
        Color::rgb(1.0, 0.0, 0.0)
    }

    fn green() -> Color {
        Color::rgb(0.0, 1.0, 0.0)
    }

    #[test]
    fn test_add_sets_active() {
        let mut palette = Palette::new("p");
        assert_eq!(palette.active(), None);

        assert_eq!(palette.add(red()), 0);
        assert_eq!(palette.add(green()), 1);
        assert_eq!(palette.active(), Some(1));
        assert_eq!(palette.active_color(), Some(&green()));
        assert_eq!(palette.colors(), &[red(), green()]);
    }

    #[test]
    fn test_add_drops_alpha() {
        let mut palette = Palette::new("p");
        palette.add(Color::rgba(0.2, 0.4, 0.6, 0.1));
        assert_eq!(palette.colors()[0].alpha, 1.0);
    }

    #[test]
    fn test_add_clamps_channels() {
        let mut palette = Palette::new("p");
        palette.add(Color::rgb(2.0, -1.0, 0.25));
        assert_eq!(palette.colors(), &[Color::rgb(1.0, 0.0, 0.25)]);
    }

    #[test]
    fn test_set_active_out_of_range() {
        let mut palette = Palette::new("p");
        palette.add(red());
        assert_eq!(palette.set_active(1), Err(PaletteError::ActiveOutOfRange(1)));
        assert!(palette.set_active(0).is_ok());
    }

    #[test]
    fn test_clear_resets_active() {
        let mut palette = Palette::new("p");
        palette.add(red());
        palette.clear();
        assert!(palette.is_empty());
        assert_eq!(palette.active_color(), None);
    }

    #[test]
    fn test_get_or_create_is_idempotent() {
        let mut library = PaletteLibrary::new();
        library.get_or_create(PICKER_PALETTE_NAME).add(red());
        library.get_or_create(PICKER_PALETTE_NAME).add(green());

        assert_eq!(library.len(), 1);
        assert_eq!(library.get(PICKER_PALETTE_NAME).map(Palette::len), Some(2));
    }

    #[test]
    fn test_create_uniquifies() {
        let mut library = PaletteLibrary::new();
        library.create("p");
        assert_eq!(library.create("p").name(), "p.001");
        assert_eq!(library.create("p").name(), "p.002");
        assert_eq!(library.names().collect::<Vec<_>>(), ["p", "p.001", "p.002"]);
    }

    #[test]
    fn test_copy_as() {
        let mut library = PaletteLibrary::new();
        library.create(PICKER_PALETTE_NAME).add(red());

        let name = library.copy_as(PICKER_PALETTE_NAME, "Sunset").unwrap();
        assert_eq!(name, "Sunset");

        let copy = library.get("Sunset").unwrap();
        assert!(copy.keep);
        assert_eq!(copy.colors(), &[red()]);

        // the copy is independent of the working palette
        library.clear(PICKER_PALETTE_NAME).unwrap();
        assert_eq!(library.get("Sunset").map(Palette::len), Some(1));

        assert_eq!(library.copy_as(PICKER_PALETTE_NAME, "Sunset"), Ok("Sunset.001".to_string()));
    }

    #[test]
    fn test_copy_as_rejects_empty_name() {
        let mut library = PaletteLibrary::new();
        library.create(PICKER_PALETTE_NAME);
        assert_eq!(library.copy_as(PICKER_PALETTE_NAME, ""), Err(PaletteError::EmptyName));
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn test_missing_palette() {
        let mut library = PaletteLibrary::new();
        let missing = PaletteError::NotFound("nope".to_string());
        assert_eq!(library.clear("nope"), Err(missing.clone()));
        assert_eq!(library.append("nope", red()), Err(missing.clone()));
        assert_eq!(library.copy_as("nope", "x"), Err(missing.clone()));
        assert_eq!(library.active_color("nope"), Err(missing));
    }

    #[test]
    fn test_library_active() {
        let mut library = PaletteLibrary::new();
        library.create("p");
        library.append("p", red()).unwrap();
        library.append("p", green()).unwrap();
        library.set_active("p", 0).unwrap();
        assert_eq!(library.active_color("p"), Ok(Some(&red())));
    }
}
