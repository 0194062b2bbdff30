//! Caller-owned simulation state for each mode.
//!
//! These wrap the engines with the input handling a front end needs: text
//! submissions are validated, failures land in the message log, and the
//! previous values stay in effect.

use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use crate::config::Config;
use crate::elementary::{self, Boundary, OneDimGrid};
use crate::error::{LatticeError, Result};
use crate::life::{Direction, LifeGrid};
use crate::messages::MessageLog;
use crate::patterns;
use crate::rule::RuleTable;
use crate::runner::Steppable;

/// 1-D mode: rule, boundary, generation history and the row target.
#[derive(Debug, Clone)]
pub struct ElementaryState {
    config: Config,
    rule: RuleTable,
    boundary: Boundary,
    grid: OneDimGrid,
    target_rows: usize,
    /// Seed of the sequential update order; `None` means all cells update at once.
    order_seed: Option<u64>,
    order: Option<Vec<usize>>,
    messages: MessageLog,
}

impl ElementaryState {
    pub fn new(config: Config) -> Self {
        let mut grid = OneDimGrid::with_buffer(config.default_lattice_width, config.default_buffer);
        grid.set_center_seed();
        Self {
            rule: RuleTable::new(config.default_rule),
            boundary: Boundary::default(),
            target_rows: config.default_iterations,
            order_seed: None,
            order: None,
            messages: MessageLog::new(config.message_capacity),
            grid,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn rule(&self) -> &RuleTable {
        &self.rule
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    pub fn grid(&self) -> &OneDimGrid {
        &self.grid
    }

    pub fn target_rows(&self) -> usize {
        self.target_rows
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    pub fn is_sequential(&self) -> bool {
        self.order.is_some()
    }

    pub fn buffer(&self) -> usize {
        self.grid.buffer()
    }

    // The order spans the stored row, padding included.
    fn rebuild_order(&mut self) {
        let width = self.grid.full_width();
        self.order = self.order_seed.map(|seed| elementary::shuffled_order(width, seed));
    }

    /// Replaces the rule and drops rows derived under the old one.
    /// Callers should stop any automatic run whatever the outcome.
    pub fn submit_rule(&mut self, input: &str) -> Result<()> {
        match RuleTable::parse(input) {
            Ok(rule) => {
                self.rule = rule;
                self.grid.clear_derived();
                self.messages.info(format!("Rule Set to {}", rule.number()));
                Ok(())
            }
            Err(e) => {
                self.messages.error(format!("Invalid Rule Number: {}", input.trim()));
                Err(e)
            }
        }
    }

    /// Starts over with an all-dead seed of the new width.
    pub fn submit_lattice_size(&mut self, input: &str) -> Result<()> {
        match elementary::parse_lattice_width(input, self.config.max_lattice_width) {
            Ok(width) => {
                self.grid = OneDimGrid::with_buffer(width, self.grid.buffer());
                self.rebuild_order();
                self.messages.info(format!("Lattice Size Set to {width}"));
                Ok(())
            }
            Err(e) => {
                self.messages.error(format!("Invalid Lattice Size: {}", input.trim()));
                Err(e)
            }
        }
    }

    /// Sets the row target. Rows past a lower target are dropped; a higher
    /// target is reached by iterating.
    pub fn submit_iterations(&mut self, input: &str) -> Result<()> {
        match elementary::parse_iterations(input, self.config.max_iterations) {
            Ok(rows) => {
                self.target_rows = rows;
                self.grid.truncate_to(rows);
                self.messages.info(format!("Iterations Set to {rows}"));
                Ok(())
            }
            Err(e) => {
                self.messages.error(format!("Invalid Iteration Count: {}", input.trim()));
                Err(e)
            }
        }
    }

    /// Sets the hidden cells kept on each side of the row. Zero turns padding off.
    pub fn submit_buffer(&mut self, input: &str) -> Result<()> {
        match elementary::parse_buffer(input, self.config.max_buffer) {
            Ok(buffer) => {
                self.grid.set_buffer(buffer);
                self.rebuild_order();
                self.messages.info(format!("Buffer Size Set to {buffer}"));
                Ok(())
            }
            Err(e) => {
                self.messages.error(format!("Invalid Buffer Size: {}", input.trim()));
                Err(e)
            }
        }
    }

    pub fn set_boundary(&mut self, boundary: Boundary) {
        if boundary != self.boundary {
            self.boundary = boundary;
            self.grid.clear_derived();
            self.messages.info(format!("Boundary Set to {boundary:?}"));
        }
    }

    /// Switches between synchronous updates and a seeded sequential order.
    pub fn set_sequential(&mut self, seed: Option<u64>) {
        self.order_seed = seed;
        self.rebuild_order();
        self.grid.clear_derived();
    }

    /// Appends up to `count` rows without passing the target. Returns rows added.
    pub fn iterate(&mut self, count: usize) -> usize {
        let goal = self.grid.row_count().saturating_add(count).min(self.target_rows);
        let (rule, boundary) = (self.rule, self.boundary);
        match &self.order {
            None => self.grid.grow_to(goal, &rule, boundary),
            Some(order) => self.grid.grow_to_with(goal, |last| {
                elementary::step_ordered(last, &rule, boundary, order)
                    .unwrap_or_else(|_| elementary::step(last, &rule, boundary))
            }),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.grid.row_count() >= self.target_rows
    }

    /// Toggles a seed cell. Rows already derived are left as they are.
    pub fn flip_seed(&mut self, col: usize) -> Result<bool> {
        self.grid.flip_seed(col).inspect_err(|e| self.messages.error(e.to_string()))
    }

    pub fn clear(&mut self) {
        self.grid.clear();
    }

    pub fn fill_seed(&mut self) {
        self.grid.fill_seed();
        self.messages.info("Filled Lattice");
    }

    pub fn randomize_seed(&mut self, seed: u64) {
        self.grid.randomize_seed(seed);
        self.messages.info("Randomized Lattice");
    }

    /// Keeps the seed and recomputes from it on the next iteration.
    pub fn clear_derived(&mut self) {
        self.grid.clear_derived();
    }
}

impl Steppable for ElementaryState {
    fn advance(&mut self) -> bool {
        self.iterate(1);
        !self.is_complete()
    }
}

const HISTORY_LEN: usize = 10;

/// 2-D mode: the growing Life grid, iteration counter and reset snapshot.
#[derive(Debug, Clone)]
pub struct LifeState {
    config: Config,
    grid: LifeGrid,
    iteration: u64,
    saved: Option<LifeGrid>,
    grid_history: [u64; HISTORY_LEN],
    history_count: usize,
    cycling: bool,
    messages: MessageLog,
}

impl LifeState {
    pub fn new(config: Config) -> Self {
        Self {
            grid: Self::fresh_grid(&config),
            iteration: 0,
            saved: None,
            grid_history: [0; HISTORY_LEN],
            history_count: 0,
            cycling: false,
            messages: MessageLog::new(config.message_capacity),
            config,
        }
    }

    fn fresh_grid(config: &Config) -> LifeGrid {
        LifeGrid::with_margin(config.life_view_width, config.life_view_height, config.life_margin)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn grid(&self) -> &LifeGrid {
        &self.grid
    }

    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    /// True once the grid has repeated one of its recent states.
    pub fn is_cycling(&self) -> bool {
        self.cycling
    }

    /// Steps once, growing toward any edge the new generation touches.
    /// The first iteration after a clear or load snapshots the grid for [`LifeState::reset`].
    pub fn iterate(&mut self) -> BTreeSet<Direction> {
        if self.iteration == 0 {
            self.saved = Some(self.grid.clone());
        }
        let touched = self.grid.advance(self.config.growth_amount());
        self.iteration += 1;
        self.cycling = self.check_for_cycle();
        touched
    }

    fn hash_grid(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.grid.hash(&mut hasher);
        hasher.finish()
    }

    fn check_for_cycle(&mut self) -> bool {
        let current_hash = self.hash_grid();
        let filled = self.history_count.min(HISTORY_LEN);
        if self.grid_history[..filled].contains(&current_hash) {
            return true;
        }
        self.grid_history[self.history_count % HISTORY_LEN] = current_hash;
        self.history_count += 1;
        false
    }

    fn restart_counters(&mut self) {
        self.iteration = 0;
        self.grid_history = [0; HISTORY_LEN];
        self.history_count = 0;
        self.cycling = false;
    }

    /// Restores the grid as it was before the first iteration.
    pub fn reset(&mut self) {
        match &self.saved {
            Some(saved) => {
                self.grid = saved.clone();
                self.restart_counters();
            }
            None => self.messages.error("Nothing to reset to"),
        }
    }

    pub fn clear(&mut self) {
        self.grid = Self::fresh_grid(&self.config);
        self.saved = None;
        self.restart_counters();
    }

    /// Clears and places a preset at the view center. Returns cells clipped.
    pub fn load_preset(&mut self, name: &str) -> Result<usize> {
        let pattern = match patterns::find(name) {
            Some(pattern) => pattern,
            None => {
                self.messages.error(format!("Unknown Preset: {name}"));
                return Err(LatticeError::UnknownPreset(name.to_string()));
            }
        };
        self.clear();
        let clipped = patterns::apply_pattern(&mut self.grid, pattern);
        self.messages.info(format!("Loaded {}", pattern.name));
        Ok(clipped)
    }

    pub fn randomize(&mut self, seed: u64) {
        self.clear();
        patterns::apply_random_pattern(&mut self.grid, seed);
    }

    /// Toggles a cell addressed relative to the viewport.
    pub fn flip_in_view(&mut self, row: usize, col: usize) -> Result<bool> {
        self.grid
            .flip_in_view(row, col)
            .inspect_err(|e| self.messages.error(e.to_string()))
    }
}

impl Steppable for LifeState {
    fn advance(&mut self) -> bool {
        self.iterate();
        !self.cycling && self.grid.population() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Level;

    fn small_config() -> Config {
        Config {
            default_lattice_width: 11,
            default_iterations: 6,
            life_view_width: 12,
            life_view_height: 12,
            life_margin: 2,
            ..Config::default()
        }
    }

    #[test]
    fn elementary_iterates_up_to_the_target() {
        let mut state = ElementaryState::new(small_config());
        assert_eq!(state.grid().row_count(), 1);
        assert_eq!(state.iterate(3), 3);
        assert_eq!(state.iterate(10), 2);
        assert!(state.is_complete());
        assert_eq!(state.iterate(1), 0);
    }

    #[test]
    fn huge_iterate_requests_saturate() {
        let mut state = ElementaryState::new(small_config());
        state.iterate(1);
        assert_eq!(state.iterate(usize::MAX), 4);
        assert_eq!(state.grid().row_count(), 6);
        assert_eq!(state.iterate(usize::MAX), 0);
    }

    #[test]
    fn bad_rule_keeps_the_old_one() {
        let mut state = ElementaryState::new(small_config());
        state.iterate(5);
        let err = state.submit_rule("256").unwrap_err();
        assert_eq!(err, LatticeError::InvalidRuleNumber("256".into()));
        assert_eq!(state.rule().number(), 90);
        assert_eq!(state.grid().row_count(), 6);
        let latest = state.messages().latest().unwrap();
        assert_eq!(latest.level, Level::Error);
        assert_eq!(latest.text, "Invalid Rule Number: 256");

        state.submit_rule("30").unwrap();
        assert_eq!(state.rule().number(), 30);
        assert_eq!(state.grid().row_count(), 1);
        assert!(state.grid().seed()[5]);
    }

    #[test]
    fn iteration_target_bounds() {
        let mut state = ElementaryState::new(small_config());
        state.iterate(5);
        assert!(state.submit_iterations("0").is_err());
        assert!(state.submit_iterations("1001").is_err());
        assert_eq!(state.target_rows(), 6);

        state.submit_iterations("3").unwrap();
        assert_eq!(state.grid().row_count(), 3);
        state.submit_iterations("8").unwrap();
        assert_eq!(state.iterate(100), 5);
    }

    #[test]
    fn lattice_size_resets_the_grid() {
        let mut state = ElementaryState::new(small_config());
        state.iterate(2);
        assert!(state.submit_lattice_size("abc").is_err());
        assert_eq!(state.grid().width(), 11);
        state.submit_lattice_size("40").unwrap();
        assert_eq!(state.grid().width(), 40);
        assert_eq!(state.grid().row_count(), 1);
        assert!(state.grid().seed().iter().all(|&c| !c));
    }

    #[test]
    fn sequential_mode_uses_the_order() {
        let mut state = ElementaryState::new(small_config());
        state.set_sequential(Some(3));
        assert!(state.is_sequential());
        state.iterate(5);
        let order = elementary::shuffled_order(11, 3);
        let expected = elementary::step_ordered(
            state.grid().seed(),
            state.rule(),
            state.boundary(),
            &order,
        )
        .unwrap();
        assert_eq!(state.grid().rows()[1], expected);
    }

    #[test]
    fn resizing_keeps_the_sequential_seed() {
        let mut state = ElementaryState::new(small_config());
        state.set_sequential(Some(3));
        state.submit_lattice_size("20").unwrap();
        for col in [3, 4, 10, 17] {
            state.flip_seed(col).unwrap();
        }
        state.iterate(1);
        let expected = elementary::step_ordered(
            state.grid().seed(),
            state.rule(),
            state.boundary(),
            &elementary::shuffled_order(20, 3),
        )
        .unwrap();
        assert_eq!(state.grid().rows()[1], expected);
    }

    #[test]
    fn buffer_pads_the_row_and_the_order() {
        let mut state = ElementaryState::new(small_config());
        state.set_sequential(Some(5));
        assert!(state.submit_buffer("600").is_err());
        assert_eq!(state.buffer(), 0);

        state.submit_buffer("4").unwrap();
        assert_eq!(state.buffer(), 4);
        assert_eq!(state.grid().full_width(), 19);
        assert_eq!(state.messages().latest().unwrap().text, "Buffer Size Set to 4");
        // The center seed survives the padding change.
        assert!(state.grid().visible_rows()[0][5]);

        assert_eq!(state.iterate(3), 3);
        assert!(state.grid().rows().iter().all(|row| row.len() == 19));
        assert!(state.grid().visible_rows().iter().all(|row| row.len() == 11));

        state.submit_lattice_size("7").unwrap();
        assert_eq!(state.grid().full_width(), 15);
        assert_eq!(state.iterate(2), 2);
    }

    #[test]
    fn fill_and_randomize_drop_derived_rows() {
        let mut state = ElementaryState::new(small_config());
        state.iterate(4);
        state.fill_seed();
        assert_eq!(state.grid().row_count(), 1);
        assert!(state.grid().seed().iter().all(|&c| c));
        assert_eq!(state.messages().latest().unwrap().text, "Filled Lattice");

        state.iterate(2);
        state.randomize_seed(9);
        assert_eq!(state.grid().row_count(), 1);
        assert_eq!(state.messages().latest().unwrap().text, "Randomized Lattice");
    }

    #[test]
    fn elementary_advance_stops_at_target() {
        let mut state = ElementaryState::new(small_config());
        let mut steps = 0;
        while state.advance() {
            steps += 1;
        }
        assert_eq!(steps, 4);
        assert_eq!(state.grid().row_count(), 6);
    }

    #[test]
    fn life_reset_restores_the_first_generation() {
        let mut state = LifeState::new(small_config());
        state.load_preset("Glider").unwrap();
        let start = state.grid().clone();
        for _ in 0..3 {
            state.iterate();
        }
        assert_eq!(state.iteration(), 3);
        assert_ne!(state.grid(), &start);

        state.reset();
        assert_eq!(state.grid(), &start);
        assert_eq!(state.iteration(), 0);
    }

    #[test]
    fn still_life_is_detected_as_a_cycle() {
        let mut state = LifeState::new(small_config());
        state.load_preset("Block").unwrap();
        assert!(state.advance());
        assert!(!state.advance());
        assert!(state.is_cycling());
    }

    #[test]
    fn unknown_preset_leaves_the_grid_alone() {
        let mut state = LifeState::new(small_config());
        state.flip_in_view(0, 0).unwrap();
        assert!(state.load_preset("nope").is_err());
        assert_eq!(state.grid().population(), 1);
        assert!(state.flip_in_view(12, 0).is_err());
        assert_eq!(state.messages().len(), 2);
    }

    #[test]
    fn glider_grows_the_grid_as_it_travels() {
        let mut state = LifeState::new(small_config());
        state.load_preset("Glider").unwrap();
        let start_width = state.grid().width();
        for _ in 0..60 {
            state.iterate();
        }
        assert_eq!(state.grid().population(), 5);
        assert!(state.grid().width() > start_width);
        assert_eq!(state.grid().viewport().width(), 12);
    }
}
