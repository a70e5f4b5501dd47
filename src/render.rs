use crate::attack::AttackKind;
use crate::config::{MAX_HEALTH, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::input::{InputFrame, InputSource};
use crate::selector::AttackSelector;
use crate::terrain::Terrain;
use crate::view::{AimPreview, CharacterView, FrameView, ProjectileView, Renderer};
use macroquad::prelude::*;

const SKY_COLOUR: Color = Color::new(0.68, 0.85, 0.90, 1.0); // light blue
const NAME_FONT_SIZE: f32 = 16.0;
const LOG_FONT_SIZE: f32 = 20.0;
const COUNTDOWN_FONT_SIZE: f32 = 36.0;
const CHARACTER_RADIUS: f32 = 6.0;
const HEALTH_BAR_WIDTH: f32 = 40.0;
const HEALTH_BAR_HEIGHT: f32 = 10.0;

fn colour_from_rgb([r, g, b]: [u8; 3]) -> Color {
    Color::from_rgba(r, g, b, 255)
}

fn faded_color(mut color: Color, alpha: f32) -> Color {
    color.a *= alpha;
    color
}

// Draws frames with macroquad: the carved map texture, characters, projectiles and the HUD
pub struct MacroquadRenderer {
    map_image: Image, // Colours of the map; alpha is rewritten from the terrain mask
    map_texture: Option<Texture2D>,
    terrain_revision: Option<u64>, // Revision the texture was last built from
}

impl MacroquadRenderer {
    pub fn new(map_image: Image) -> Self {
        MacroquadRenderer {
            map_image,
            map_texture: None,
            terrain_revision: None,
        }
    }

    // Copies the solidity mask into the image alpha and re-uploads the texture
    fn refresh_map(&mut self, terrain: &Terrain, revision: u64) {
        if self.terrain_revision == Some(revision) && self.map_texture.is_some() {
            return;
        }
        for (pixel, &solid) in self.map_image.bytes.chunks_exact_mut(4).zip(terrain.mask()) {
            pixel[3] = if solid { 255 } else { 0 };
        }
        match &self.map_texture {
            Some(texture) => texture.update(&self.map_image),
            None => {
                let texture = Texture2D::from_image(&self.map_image);
                texture.set_filter(FilterMode::Nearest);
                self.map_texture = Some(texture);
            }
        }
        self.terrain_revision = Some(revision);
    }

    fn draw_character(character: &CharacterView, (cx, cy): (f32, f32)) {
        let x = character.pos.x as f32 - cx;
        let y = character.pos.y as f32 - cy;
        let team_colour = colour_from_rgb(character.team_colour);

        if character.controlled {
            draw_triangle(
                vec2(x, y - 20.0),
                vec2(x - 5.0, y - 30.0),
                vec2(x + 5.0, y - 30.0),
                team_colour,
            );
        }
        match character.aim {
            Some(AimPreview::Sight { end }) => {
                draw_line(x, y, end.x as f32 - cx, end.y as f32 - cy, 1.0, DARKGREEN);
            }
            Some(AimPreview::Charge { end }) => {
                draw_line(x, y, end.x as f32 - cx, end.y as f32 - cy, 2.0, BLACK);
            }
            None => {}
        }

        let bar_x = x - HEALTH_BAR_WIDTH / 2.0;
        let bar_y = y - 20.0;
        let filled = HEALTH_BAR_WIDTH * character.health as f32 / MAX_HEALTH as f32;
        let health_colour = colour_from_rgb(character.health_colour);
        draw_rectangle(bar_x, bar_y, filled, HEALTH_BAR_HEIGHT, health_colour);
        draw_rectangle_lines(bar_x, bar_y, HEALTH_BAR_WIDTH, HEALTH_BAR_HEIGHT, 1.0, BLACK);

        let dims = measure_text(&character.name, None, NAME_FONT_SIZE as u16, 1.0);
        draw_text(&character.name, x - dims.width / 2.0, y - 40.0, NAME_FONT_SIZE, team_colour);

        draw_circle(x, y, CHARACTER_RADIUS, team_colour);
    }

    fn draw_projectile(projectile: &ProjectileView, (cx, cy): (f32, f32)) {
        let x = projectile.pos.x as f32 - cx;
        let y = projectile.pos.y as f32 - cy;
        match projectile.kind {
            AttackKind::RocketLauncher => draw_circle(x, y, 3.0, DARKGRAY),
            AttackKind::ThrowGrenade => {
                draw_circle(x, y, 4.0, DARKGREEN);
                draw_circle_lines(x, y, 4.0, 1.0, BLACK);
            }
        }
    }

    fn draw_log(messages: &[String]) {
        let mut y = SCREEN_HEIGHT as f32 - 10.0;
        for message in messages.iter().rev() {
            draw_text(message, 10.0, y, LOG_FONT_SIZE, BLACK);
            y -= LOG_FONT_SIZE + 4.0;
        }
    }

    fn draw_countdown(seconds: i64) {
        let text = seconds.to_string();
        let dims = measure_text(&text, None, COUNTDOWN_FONT_SIZE as u16, 1.0);
        let x = SCREEN_WIDTH as f32 / 2.0 - dims.width / 2.0;
        draw_text(&text, x, COUNTDOWN_FONT_SIZE, COUNTDOWN_FONT_SIZE, BLACK);
    }

    fn draw_selector(selector: &AttackSelector, mouse: Option<(f32, f32)>) {
        let (left, top) = selector.position();
        let size = selector.height();
        draw_rectangle(left, top, selector.width(), size, faded_color(WHITE, 0.5));

        let hovered = mouse.and_then(|m| selector.button_at(m));
        for (i, kind) in selector.buttons.iter().enumerate() {
            let x = left + i as f32 * size;
            if hovered == Some(i) {
                draw_rectangle(x, top, size, size, faded_color(GRAY, 0.5));
            }
            draw_rectangle_lines(x, top, size, size, 1.0, BLACK);
            let dims = measure_text(kind.name(), None, NAME_FONT_SIZE as u16, 1.0);
            let label_x = x + (size - dims.width) / 2.0;
            draw_text(kind.name(), label_x, top + size / 2.0, NAME_FONT_SIZE, BLACK);
        }
    }

    pub fn window_should_close() -> bool {
        is_quit_requested()
    }
}

impl Renderer for MacroquadRenderer {
    fn draw(&mut self, frame: &FrameView, terrain: &Terrain) {
        self.refresh_map(terrain, frame.terrain_revision);

        set_default_camera();
        clear_background(SKY_COLOUR);

        let camera = (frame.camera.0 as f32, frame.camera.1 as f32);
        if let Some(texture) = &self.map_texture {
            draw_texture(texture, -camera.0, -camera.1, WHITE);
        }
        for character in &frame.characters {
            Self::draw_character(character, camera);
        }
        for projectile in &frame.projectiles {
            Self::draw_projectile(projectile, camera);
        }

        Self::draw_log(&frame.messages);
        if let Some(seconds) = frame.countdown {
            Self::draw_countdown(seconds);
        }
        if let Some(selector) = &frame.selector {
            Self::draw_selector(selector, frame.mouse);
        }
    }
}

// Arrow keys walk and aim, space jumps, Enter charges and fires, left click picks weapons
#[derive(Debug, Default)]
pub struct KeyboardInput;

impl InputSource for KeyboardInput {
    fn poll(&mut self) -> InputFrame {
        InputFrame {
            walk_left: is_key_down(KeyCode::Left),
            walk_right: is_key_down(KeyCode::Right),
            jump: is_key_pressed(KeyCode::Space),
            attack_pressed: is_key_pressed(KeyCode::Enter),
            attack_held: is_key_down(KeyCode::Enter),
            aim_up: is_key_down(KeyCode::Up),
            aim_down: is_key_down(KeyCode::Down),
            click: is_mouse_button_pressed(MouseButton::Left).then(mouse_position),
            mouse: Some(mouse_position()),
            quit: is_key_pressed(KeyCode::Escape),
        }
    }
}
