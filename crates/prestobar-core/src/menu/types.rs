//! Menu tree consumed by the menu-bar host.

/// One line of a menu: an item or a horizontal rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuLine {
    Item(MenuItem),
    Separator,
}

impl MenuLine {
    pub fn is_separator(&self) -> bool {
        matches!(self, MenuLine::Separator)
    }

    /// The item, if this line is one
    pub fn as_item(&self) -> Option<&MenuItem> {
        match self {
            MenuLine::Item(item) => Some(item),
            MenuLine::Separator => None,
        }
    }
}

impl From<MenuItem> for MenuLine {
    fn from(item: MenuItem) -> Self {
        MenuLine::Item(item)
    }
}

/// A menu entry, optionally with a nested submenu
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuItem {
    pub text: String,
    pub color: Option<String>,
    pub href: Option<String>,
    /// Base64-encoded image
    pub image: Option<String>,
    /// `Some(false)` keeps the line out of the dropdown (title only)
    pub dropdown: Option<bool>,
    pub submenu: Vec<MenuLine>,
}

impl MenuItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    /// Attach an image if one is available
    pub fn image(mut self, image: Option<String>) -> Self {
        self.image = image;
        self
    }

    pub fn dropdown(mut self, dropdown: bool) -> Self {
        self.dropdown = Some(dropdown);
        self
    }

    pub fn submenu(mut self, submenu: Vec<MenuLine>) -> Self {
        self.submenu = submenu;
        self
    }
}
