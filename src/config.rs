//! Configuration module for shortcuts, gallery behaviour and networking.
//! Settings live in an INI file in the platform config directory.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, warn};

use crate::catalog::DEFAULT_CATALOG_URL;
use crate::error::{Error, Result};
use crate::gallery::{ScalingMode, DEFAULT_NAV_STRIP_WIDTH, DEFAULT_TRANSITION};
use crate::http::{ClientOptions, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use crate::image_loader::DEFAULT_MAX_TEXTURE_SIDE;

const DEFAULT_CONFIG_INI: &str = include_str!("../config.ini");

/// Keyboard input a shortcut can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputBinding {
    Key(egui::Key),
    KeyWithCtrl(egui::Key),
    KeyWithShift(egui::Key),
    KeyWithAlt(egui::Key),
}

impl InputBinding {
    /// Binding for `key` pressed with `modifiers`. Ctrl wins over shift, shift over alt.
    pub fn from_key(key: egui::Key, modifiers: egui::Modifiers) -> Self {
        if modifiers.ctrl || modifiers.command {
            InputBinding::KeyWithCtrl(key)
        } else if modifiers.shift {
            InputBinding::KeyWithShift(key)
        } else if modifiers.alt {
            InputBinding::KeyWithAlt(key)
        } else {
            InputBinding::Key(key)
        }
    }
}

/// All configurable actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    NextImage,
    PreviousImage,
    NextProduct,
    PreviousProduct,
    Exit,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::NextImage,
        Action::PreviousImage,
        Action::NextProduct,
        Action::PreviousProduct,
        Action::Exit,
    ];

    pub fn from_str(s: &str) -> Option<Action> {
        match s.to_lowercase().as_str() {
            "next_image" | "next" => Some(Action::NextImage),
            "previous_image" | "previous" | "prev" => Some(Action::PreviousImage),
            "next_product" => Some(Action::NextProduct),
            "previous_product" | "prev_product" => Some(Action::PreviousProduct),
            "exit" | "quit" => Some(Action::Exit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::NextImage => "next_image",
            Action::PreviousImage => "previous_image",
            Action::NextProduct => "next_product",
            Action::PreviousProduct => "previous_product",
            Action::Exit => "exit",
        }
    }
}

/// Parse an input binding from string
pub fn parse_input_binding(s: &str) -> Option<InputBinding> {
    let s = s.trim().to_lowercase();

    if let Some(key_str) = s.strip_prefix("ctrl+") {
        return parse_key(key_str).map(InputBinding::KeyWithCtrl);
    }
    if let Some(key_str) = s.strip_prefix("shift+") {
        return parse_key(key_str).map(InputBinding::KeyWithShift);
    }
    if let Some(key_str) = s.strip_prefix("alt+") {
        return parse_key(key_str).map(InputBinding::KeyWithAlt);
    }

    parse_key(&s).map(InputBinding::Key)
}

/// Parse a single key from string
fn parse_key(s: &str) -> Option<egui::Key> {
    let s = s.trim().to_lowercase();
    match s.as_str() {
        "left" | "arrow_left" | "arrowleft" => Some(egui::Key::ArrowLeft),
        "right" | "arrow_right" | "arrowright" => Some(egui::Key::ArrowRight),
        "up" | "arrow_up" | "arrowup" => Some(egui::Key::ArrowUp),
        "down" | "arrow_down" | "arrowdown" => Some(egui::Key::ArrowDown),
        "escape" | "esc" => Some(egui::Key::Escape),
        "enter" | "return" => Some(egui::Key::Enter),
        "space" | "spacebar" => Some(egui::Key::Space),
        "tab" => Some(egui::Key::Tab),
        "backspace" => Some(egui::Key::Backspace),
        "home" => Some(egui::Key::Home),
        "end" => Some(egui::Key::End),
        "pageup" | "page_up" => Some(egui::Key::PageUp),
        "pagedown" | "page_down" => Some(egui::Key::PageDown),
        // Letters, digits and function keys share egui's own names
        other => egui::Key::from_name(&other.to_uppercase()),
    }
}

fn key_to_string(key: &egui::Key) -> String {
    key.name().to_lowercase()
}

fn binding_to_string(binding: &InputBinding) -> String {
    match binding {
        InputBinding::Key(k) => key_to_string(k),
        InputBinding::KeyWithCtrl(k) => format!("ctrl+{}", key_to_string(k)),
        InputBinding::KeyWithShift(k) => format!("shift+{}", key_to_string(k)),
        InputBinding::KeyWithAlt(k) => format!("alt+{}", key_to_string(k)),
    }
}

/// Application configuration loaded from INI file
#[derive(Debug, Clone)]
pub struct Config {
    /// Map from input binding to action
    pub bindings: HashMap<InputBinding, Action>,
    /// Reverse map for looking up bindings for an action
    pub action_bindings: HashMap<Action, Vec<InputBinding>>,

    pub scaling_mode: ScalingMode,
    pub transition_duration_ms: u64,
    pub tick_interval_ms: u64,
    pub nav_strip_width: f32,
    pub max_texture_side: u32,
    /// `None` follows the system light/dark theme
    pub background_rgb: Option<[u8; 3]>,
    pub window_width: f32,
    pub window_height: f32,

    pub catalog_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        let mut config = Self::without_bindings();
        config.set_defaults();
        config
    }
}

impl Config {
    fn without_bindings() -> Self {
        Config {
            bindings: HashMap::new(),
            action_bindings: HashMap::new(),
            scaling_mode: ScalingMode::FillWidth,
            transition_duration_ms: DEFAULT_TRANSITION.as_millis() as u64,
            tick_interval_ms: 16,
            nav_strip_width: DEFAULT_NAV_STRIP_WIDTH,
            max_texture_side: DEFAULT_MAX_TEXTURE_SIDE,
            background_rgb: None,
            window_width: 480.0,
            window_height: 720.0,
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Set default keybindings
    fn set_defaults(&mut self) {
        self.add_binding(InputBinding::Key(egui::Key::ArrowRight), Action::NextImage);
        self.add_binding(InputBinding::Key(egui::Key::ArrowLeft), Action::PreviousImage);

        self.add_binding(InputBinding::Key(egui::Key::PageDown), Action::NextProduct);
        self.add_binding(InputBinding::KeyWithCtrl(egui::Key::ArrowRight), Action::NextProduct);
        self.add_binding(InputBinding::Key(egui::Key::PageUp), Action::PreviousProduct);
        self.add_binding(InputBinding::KeyWithCtrl(egui::Key::ArrowLeft), Action::PreviousProduct);

        self.add_binding(InputBinding::Key(egui::Key::Escape), Action::Exit);
        self.add_binding(InputBinding::KeyWithCtrl(egui::Key::W), Action::Exit);
    }

    /// Add a binding
    fn add_binding(&mut self, input: InputBinding, action: Action) {
        if let Some(previous) = self.bindings.insert(input, action) {
            if let Some(list) = self.action_bindings.get_mut(&previous) {
                list.retain(|b| *b != input);
            }
        }
        let list = self.action_bindings.entry(action).or_default();
        if !list.contains(&input) {
            list.push(input);
        }
    }

    pub fn is_action(&self, input: &InputBinding, action: Action) -> bool {
        self.bindings.get(input) == Some(&action)
    }

    pub fn action_for(&self, input: &InputBinding) -> Option<Action> {
        self.bindings.get(input).copied()
    }

    pub fn get_bindings(&self, action: Action) -> Vec<InputBinding> {
        self.action_bindings.get(&action).cloned().unwrap_or_default()
    }

    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_duration_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            timeout: Duration::from_secs(self.request_timeout_secs),
            user_agent: self.user_agent.clone(),
        }
    }

    /// Settings file path in the platform config directory
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "product-gallery", "product-gallery")
            .map(|dirs| dirs.config_dir().join("config.ini"))
    }

    /// Load the user's configuration, creating it from the template on first run.
    /// Falls back to defaults when the file can't be used.
    pub fn load() -> Self {
        let Some(config_path) = Self::config_path() else {
            warn!("No config directory available, using defaults");
            return Self::parse_ini(DEFAULT_CONFIG_INI);
        };

        if !config_path.exists() {
            let created = config_path
                .parent()
                .map_or(Ok(()), fs::create_dir_all)
                .and_then(|_| fs::write(&config_path, DEFAULT_CONFIG_INI));
            if let Err(e) = created {
                warn!("Could not create {}: {e}", config_path.display());
                return Self::parse_ini(DEFAULT_CONFIG_INI);
            }
            debug!("Created {}", config_path.display());
        }

        match Self::load_from_path(&config_path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Could not read {}: {e}, using defaults", config_path.display());
                Self::parse_ini(DEFAULT_CONFIG_INI)
            }
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse_ini(&content))
    }

    /// Parse INI content into Config
    pub fn parse_ini(content: &str) -> Self {
        let mut config = Self::without_bindings();
        let mut shortcuts_seen: Vec<Action> = Vec::new();

        let mut in_shortcuts_section = false;
        let mut in_settings_section = false;
        let mut in_network_section = false;

        for line in content.lines() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                let section = &line[1..line.len() - 1];
                in_shortcuts_section = section.eq_ignore_ascii_case("shortcuts");
                in_settings_section = section.eq_ignore_ascii_case("settings");
                in_network_section = section.eq_ignore_ascii_case("network");
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim().to_lowercase();
            let value = value.trim();

            if in_shortcuts_section {
                if let Some(action) = Action::from_str(&key) {
                    shortcuts_seen.push(action);
                    // Value can be comma-separated for multiple bindings
                    for binding_str in value.split(',') {
                        match parse_input_binding(binding_str) {
                            Some(binding) => config.add_binding(binding, action),
                            None => debug!("Unknown key binding '{}'", binding_str.trim()),
                        }
                    }
                }
            } else if in_settings_section {
                config.apply_setting(&key, value);
            } else if in_network_section {
                config.apply_network_setting(&key, value);
            }
        }

        // Actions the file never mentions keep their default keys
        let defaults = Config::default();
        for action in Action::ALL {
            if shortcuts_seen.contains(&action) {
                continue;
            }
            for binding in defaults.get_bindings(action) {
                if !config.bindings.contains_key(&binding) {
                    config.add_binding(binding, action);
                }
            }
        }

        config
    }

    fn apply_setting(&mut self, key: &str, value: &str) {
        match key {
            "scaling_mode" | "scaling" => {
                if let Some(mode) = ScalingMode::from_str(value) {
                    self.scaling_mode = mode;
                }
            }
            "transition_duration_ms" | "transition_ms" => {
                if let Ok(v) = value.parse::<u64>() {
                    self.transition_duration_ms = v.min(5000);
                }
            }
            "tick_interval_ms" => {
                if let Ok(v) = value.parse::<u64>() {
                    self.tick_interval_ms = v.clamp(1, 100);
                }
            }
            "nav_strip_width" => {
                if let Ok(v) = value.parse::<f32>() {
                    self.nav_strip_width = v.clamp(8.0, 200.0);
                }
            }
            "max_texture_side" => {
                if let Ok(v) = value.parse::<u32>() {
                    self.max_texture_side = v.min(16384);
                }
            }
            "background_rgb" => {
                if let Some(rgb) = parse_rgb_triplet(value) {
                    self.background_rgb = Some(rgb);
                }
            }
            "window_width" => {
                if let Ok(v) = value.parse::<f32>() {
                    self.window_width = v.clamp(200.0, 8000.0);
                }
            }
            "window_height" => {
                if let Ok(v) = value.parse::<f32>() {
                    self.window_height = v.clamp(200.0, 8000.0);
                }
            }
            _ => debug!("Unknown setting '{key}'"),
        }
    }

    fn apply_network_setting(&mut self, key: &str, value: &str) {
        match key {
            "catalog_url" => {
                if !value.is_empty() {
                    self.catalog_url = value.to_string();
                }
            }
            "request_timeout_secs" | "timeout" => {
                if let Ok(v) = value.parse::<u64>() {
                    self.request_timeout_secs = v.clamp(1, 600);
                }
            }
            "user_agent" => {
                if !value.is_empty() {
                    self.user_agent = value.to_string();
                }
            }
            _ => debug!("Unknown network setting '{key}'"),
        }
    }

    /// Render the configuration back to INI text
    pub fn to_ini(&self) -> String {
        let mut content = String::new();

        content.push_str("; Product Gallery Configuration\n\n");

        content.push_str("[Settings]\n");
        content.push_str("; How gallery images are sized: center, fit, fill_width, fill_height\n");
        content.push_str(&format!("scaling_mode = {}\n", self.scaling_mode.as_str()));
        content.push_str(&format!(
            "transition_duration_ms = {}\n",
            self.transition_duration_ms
        ));
        content.push_str(&format!("tick_interval_ms = {}\n", self.tick_interval_ms));
        content.push_str(&format!("nav_strip_width = {}\n", self.nav_strip_width));
        content.push_str(&format!("max_texture_side = {}\n", self.max_texture_side));
        if let Some([r, g, b]) = self.background_rgb {
            content.push_str(&format!("background_rgb = {r}, {g}, {b}\n"));
        }
        content.push_str(&format!("window_width = {}\n", self.window_width));
        content.push_str(&format!("window_height = {}\n\n", self.window_height));

        content.push_str("[Network]\n");
        content.push_str(&format!("catalog_url = {}\n", self.catalog_url));
        content.push_str(&format!(
            "request_timeout_secs = {}\n",
            self.request_timeout_secs
        ));
        content.push_str(&format!("user_agent = {}\n\n", self.user_agent));

        content.push_str("[Shortcuts]\n");
        for action in Action::ALL {
            let bindings: Vec<String> = self
                .get_bindings(action)
                .iter()
                .map(binding_to_string)
                .collect();
            content.push_str(&format!("{} = {}\n", action.as_str(), bindings.join(", ")));
        }

        content
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_ini())?;
        Ok(())
    }

    /// Save to the default location
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()
            .ok_or_else(|| Error::Config("no config directory available".into()))?;
        self.save_to_path(&path)
    }
}

fn parse_rgb_triplet(value: &str) -> Option<[u8; 3]> {
    let parts: Vec<&str> = value.split(',').map(|p| p.trim()).collect();
    if parts.len() != 3 {
        return None;
    }
    let r = parts[0].parse::<u8>().ok()?;
    let g = parts[1].parse::<u8>().ok()?;
    let b = parts[2].parse::<u8>().ok()?;
    Some([r, g, b])
}
