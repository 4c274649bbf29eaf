use lifegrid_kernel::LifeEngine;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads the engine's current generation and produces output. It
/// never mutates the engine.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render the current generation.
    fn render(&self, engine: &LifeEngine) -> Self::Output;
}

/// Plain-text renderer: a header line then one line per grid row.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    pub alive: char,
    pub dead: char,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            alive: '#',
            dead: '.',
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_glyphs(alive: char, dead: char) -> Self {
        Self { alive, dead }
    }
}

impl Renderer for TextRenderer {
    type Output = String;

    fn render(&self, engine: &LifeEngine) -> String {
        let size = engine.size();
        let mut out = String::with_capacity((size + 1) * size + 64);
        out.push_str(&format!(
            "=== Generation {} ({}) population={} ===\n",
            engine.generation(),
            if engine.is_running() { "running" } else { "paused" },
            engine.population()
        ));
        for row in engine.grid().cells().chunks(size) {
            out.extend(row.iter().map(|&alive| if alive { self.alive } else { self.dead }));
            out.push('\n');
        }
        out
    }
}
