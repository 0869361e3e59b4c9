//! The curve on screen: the current generation plus the iterator that
//! produces the following ones.

use crate::fractal::{Generations, Rule};
use crate::geometry::Segment;
use crate::raster::{Raster, Rgba};

pub struct Curve {
    rule_name: String,
    generations: Generations,
    lines: Vec<Segment>,
    generation: usize,
    epoch: u64,
    rendered_epoch: Option<u64>,
}

impl Curve {
    /// Starts at generation 0 (the seed). `generations` counts the seed, so
    /// the last reachable generation is `generations - 1`.
    pub fn new(rule: &str, seed: Vec<Segment>, generations: usize) -> Self {
        let mut gens = Generations::by_name(rule, seed, generations.max(1));
        let lines = gens.next().unwrap_or_default();
        Self {
            rule_name: rule.to_string(),
            generations: gens,
            lines,
            generation: 0,
            epoch: 0,
            rendered_epoch: None,
        }
    }

    pub fn rule(&self) -> Option<Rule> {
        self.generations.rule()
    }

    /// Step to the next generation. Returns `false` once the last one is
    /// already showing.
    pub fn advance(&mut self) -> bool {
        match self.generations.next() {
            Some(lines) => {
                self.lines = lines;
                self.generation += 1;
                self.epoch += 1;
                true
            }
            None => false,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.generations.len() == 0
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn lines(&self) -> &[Segment] {
        &self.lines
    }

    /// Rasterize the current generation into `frame`, unless this epoch was
    /// already drawn there. Returns whether anything was drawn.
    ///
    /// The frame is expected to keep its contents between calls, as the
    /// `pixels` buffer does.
    pub fn render(
        &mut self,
        frame: &mut [u8],
        width: u32,
        height: u32,
        background: Rgba,
        stroke: Rgba,
    ) -> bool {
        if self.rendered_epoch == Some(self.epoch) {
            return false;
        }
        let mut raster = Raster::new(frame, width, height);
        raster.clear(background);
        raster.set_draw_color(stroke);
        raster.draw_segments(&self.lines);
        self.rendered_epoch = Some(self.epoch);
        true
    }

    pub fn info_string(&self) -> String {
        format!(
            "{} | generation {} / {} | {} segments",
            self.rule_name,
            self.generation,
            Generations::count(&self.generations) - 1,
            self.lines.len()
        )
    }
}
