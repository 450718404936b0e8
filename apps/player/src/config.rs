//! Application defaults.
//!
//! There are no CLI flags; the player runs with these implicit defaults.

use chime_graphics::Color;

pub struct AppConfig {
    pub width: u32,
    pub height: u32,
    pub min_width: u32,
    pub min_height: u32,
    pub start_volume: f32,
    pub music_dir: String,
    pub font_path: String,
    pub play_icon: String,
    pub pause_icon: String,
    pub skip_forward_icon: String,
    pub skip_back_icon: String,
    pub row_height: i32,
    pub scroll_factor: f32,
    pub clear_color: Color,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            min_width: 400,
            min_height: 400,
            start_volume: 0.3,
            music_dir: "Music".to_string(),
            font_path: "assets/DejaVuSans.ttf".to_string(),
            play_icon: "assets/play.png".to_string(),
            pause_icon: "assets/pause.png".to_string(),
            skip_forward_icon: "assets/skip_forward.png".to_string(),
            skip_back_icon: "assets/skip_back.png".to_string(),
            row_height: 75,
            scroll_factor: 10.0,
            clear_color: Color::rgb(100, 100, 100),
        }
    }
}
