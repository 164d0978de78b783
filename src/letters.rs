//! Letter field: the spawn / move / collect loop of the letters stage.
//!
//! Coordinates are percentages of the field. `x` is measured from the left
//! edge, `y` from the bottom edge: tokens start at `y = 100` and drift toward
//! smaller values, leaving the band once `y <= EXIT_FLOOR`.

use std::collections::VecDeque;

use rand::Rng;

use crate::ALPHABET;

// --- Timing & geometry -------------------------------------------------------

pub const SPAWN_INTERVAL_MS: i32 = 800;
pub const MOVE_INTERVAL_MS: i32 = 50;
/// Beat between the last collection and the game-complete signal.
pub const COMPLETE_DELAY_MS: i32 = 500;

pub const MAX_ACTIVE_LETTERS: usize = 10;
pub const TARGET_BIAS: f64 = 0.4;
pub const SPAWN_Y: f64 = 100.0;
pub const EXIT_FLOOR: f64 = -10.0;
const SPAWN_X_MIN: f64 = 10.0;
const SPAWN_X_SPAN: f64 = 80.0;
const SPEED_MIN: f64 = 0.3;
const SPEED_SPAN: f64 = 0.3;

/// Radius (px) of a rendered token; also its click target.
pub const TOKEN_RADIUS_PX: f64 = 24.0;

#[derive(Clone, Debug, PartialEq)]
pub struct LetterToken {
    pub id: u32,
    pub glyph: char,
    pub x: f64,
    pub y: f64,
    pub speed: f64,
}

impl LetterToken {
    /// Centre of the token's disc in canvas pixels for a `width` x `height` field.
    pub fn center_px(&self, width: f64, height: f64) -> (f64, f64) {
        let cx = self.x / 100.0 * width;
        let cy = height - self.y / 100.0 * height - TOKEN_RADIUS_PX;
        (cx, cy)
    }

    fn contains(&self, px: f64, py: f64, width: f64, height: f64) -> bool {
        let (cx, cy) = self.center_px(width, height);
        let (dx, dy) = (px - cx, py - cy);
        dx * dx + dy * dy <= TOKEN_RADIUS_PX * TOKEN_RADIUS_PX
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CollectOutcome {
    /// Wrong glyph, or the token already left the field.
    Ignored,
    Collected,
    /// Last glyph collected; signal game-complete after `delay_ms`.
    Completed { delay_ms: i32 },
}

/// Active tokens plus the collected prefix of the target word.
pub struct LetterField {
    target: Vec<char>,
    collected: Vec<char>,
    tokens: VecDeque<LetterToken>,
    next_id: u32,
}

impl LetterField {
    pub fn new(target: Vec<char>) -> Self {
        Self {
            target,
            collected: Vec::with_capacity(8),
            tokens: VecDeque::with_capacity(MAX_ACTIVE_LETTERS + 1),
            next_id: 0,
        }
    }

    pub fn target(&self) -> &[char] {
        &self.target
    }

    pub fn collected(&self) -> &[char] {
        &self.collected
    }

    pub fn collected_string(&self) -> String {
        self.collected.iter().collect()
    }

    /// Next glyph to collect; `None` once the word is complete.
    pub fn needed_glyph(&self) -> Option<char> {
        self.target.get(self.collected.len()).copied()
    }

    pub fn is_complete(&self) -> bool {
        self.collected.len() == self.target.len()
    }

    pub fn tokens(&self) -> impl Iterator<Item = &LetterToken> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Spawner tick. Returns the id of the new token.
    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> u32 {
        let biased = rng.r#gen::<f64>() < TARGET_BIAS;
        let glyph = match self.needed_glyph() {
            Some(needed) if biased => needed,
            _ => ALPHABET[rng.gen_range(0..ALPHABET.len())],
        };
        let token = LetterToken {
            id: self.next_id,
            glyph,
            x: rng.r#gen::<f64>() * SPAWN_X_SPAN + SPAWN_X_MIN,
            y: SPAWN_Y,
            speed: SPEED_MIN + rng.r#gen::<f64>() * SPEED_SPAN,
        };
        self.next_id = self.next_id.wrapping_add(1);
        self.push(token)
    }

    /// Insert a token, evicting the oldest once over capacity. Callers outside
    /// `spawn` must supply an id the field has not handed out.
    pub(crate) fn push(&mut self, token: LetterToken) -> u32 {
        let id = token.id;
        log::debug!("spawn letter {} '{}' at x={:.1}", id, token.glyph, token.x);
        self.tokens.push_back(token);
        if self.tokens.len() > MAX_ACTIVE_LETTERS {
            if let Some(evicted) = self.tokens.pop_front() {
                log::debug!("evict letter {} '{}'", evicted.id, evicted.glyph);
            }
        }
        id
    }

    /// Mover tick: every token rises by its own speed; those at or below the
    /// exit floor are dropped.
    pub fn advance(&mut self) {
        self.tokens.retain_mut(|t| {
            t.y -= t.speed;
            t.y > EXIT_FLOOR
        });
    }

    /// Click / tap on the token with `id`.
    pub fn collect(&mut self, id: u32) -> CollectOutcome {
        let Some(needed) = self.needed_glyph() else {
            return CollectOutcome::Ignored;
        };
        let Some(pos) = self.tokens.iter().position(|t| t.id == id) else {
            return CollectOutcome::Ignored;
        };
        if self.tokens[pos].glyph != needed {
            log::trace!("ignored letter {} '{}', need '{}'", id, self.tokens[pos].glyph, needed);
            return CollectOutcome::Ignored;
        }
        self.tokens.remove(pos);
        self.collected.push(needed);
        log::debug!("collected '{}' -> {}", needed, self.collected_string());
        if self.is_complete() {
            CollectOutcome::Completed {
                delay_ms: COMPLETE_DELAY_MS,
            }
        } else {
            CollectOutcome::Collected
        }
    }

    /// Topmost token under a canvas point. Later tokens are drawn over earlier
    /// ones, so the search runs newest first.
    pub fn token_at(&self, px: f64, py: f64, width: f64, height: f64) -> Option<u32> {
        self.tokens
            .iter()
            .rev()
            .find(|t| t.contains(px, py, width, height))
            .map(|t| t.id)
    }

    /// Line shown under the field.
    pub fn prompt(&self) -> String {
        match self.needed_glyph() {
            Some(g) => format!("Find the letter {g} to continue"),
            None => "Find the letter ! to continue".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn love() -> LetterField {
        LetterField::new("LOVE".chars().collect())
    }

    fn token(id: u32, glyph: char, y: f64, speed: f64) -> LetterToken {
        LetterToken {
            id,
            glyph,
            x: 50.0,
            y,
            speed,
        }
    }

    #[test]
    fn spawn_respects_ranges() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut field = love();
        for _ in 0..200 {
            field.spawn(&mut rng);
            let t = field.tokens().last().unwrap();
            assert!((10.0..=90.0).contains(&t.x), "x out of range: {}", t.x);
            assert!((0.3..=0.6).contains(&t.speed), "speed out of range: {}", t.speed);
            assert_eq!(t.y, SPAWN_Y);
            assert!(t.glyph.is_ascii_uppercase());
        }
    }

    #[test]
    fn spawn_is_biased_toward_needed_glyph() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut field = love();
        let mut hits = 0;
        for _ in 0..2000 {
            field.spawn(&mut rng);
            if field.tokens().last().unwrap().glyph == 'L' {
                hits += 1;
            }
        }
        // Expected share is 0.4 + 0.6 / 26, roughly 0.42.
        assert!(hits > 700 && hits < 1000, "unexpected L count {hits}");
    }

    #[test]
    fn spawn_after_completion_is_uniform() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut field = LetterField::new(vec!['A']);
        field.push(token(100, 'A', 50.0, 0.5));
        assert!(matches!(field.collect(100), CollectOutcome::Completed { .. }));
        let mut a_count = 0;
        for _ in 0..2600 {
            field.spawn(&mut rng);
            if field.tokens().last().unwrap().glyph == 'A' {
                a_count += 1;
            }
        }
        assert!(a_count < 250, "bias leaked after completion: {a_count}");
    }

    #[test]
    fn ids_are_unique_and_increasing() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut field = love();
        let ids: Vec<u32> = (0..5).map(|_| field.spawn(&mut rng)).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn ids_stay_unique_across_eviction_and_pruning() {
        let mut rng = SmallRng::seed_from_u64(8);
        let mut field = love();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..300 {
            let id = field.spawn(&mut rng);
            assert!(seen.insert(id), "id {id} handed out twice");
            for _ in 0..16 {
                field.advance();
            }
        }
        let live: Vec<u32> = field.tokens().map(|t| t.id).collect();
        let unique: std::collections::HashSet<u32> = live.iter().copied().collect();
        assert_eq!(live.len(), unique.len());
    }

    #[test]
    fn eleventh_insert_evicts_oldest() {
        let mut field = love();
        for id in 0..10 {
            field.push(token(id, 'Q', 100.0, 0.3));
        }
        assert_eq!(field.len(), 10);
        field.push(token(10, 'Q', 100.0, 0.3));
        assert_eq!(field.len(), MAX_ACTIVE_LETTERS);
        let ids: Vec<u32> = field.tokens().map(|t| t.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn advance_moves_by_own_speed_and_prunes_at_floor() {
        let mut field = love();
        field.push(token(0, 'A', 50.0, 0.5));
        field.push(token(1, 'B', -9.5, 0.5)); // lands exactly on the floor
        field.push(token(2, 'C', -9.4, 0.3)); // lands just above it
        field.advance();
        let left: Vec<(u32, f64)> = field.tokens().map(|t| (t.id, t.y)).collect();
        assert_eq!(left.len(), 2);
        assert_eq!(left[0].0, 0);
        assert!((left[0].1 - 49.5).abs() < 1e-9);
        assert_eq!(left[1].0, 2);
        assert!((left[1].1 - -9.7).abs() < 1e-9);
    }

    #[test]
    fn collecting_in_order_spells_the_word() {
        let mut field = love();
        for (i, g) in "LOVE".chars().enumerate() {
            field.push(token(i as u32, g, 50.0, 0.3));
        }
        assert_eq!(field.collect(0), CollectOutcome::Collected);
        assert_eq!(field.collected_string(), "L");
        assert_eq!(field.collect(1), CollectOutcome::Collected);
        assert_eq!(field.collect(2), CollectOutcome::Collected);
        assert_eq!(field.collected_string(), "LOV");
        assert_eq!(
            field.collect(3),
            CollectOutcome::Completed {
                delay_ms: COMPLETE_DELAY_MS
            }
        );
        assert_eq!(field.collected_string(), "LOVE");
        assert_eq!(field.needed_glyph(), None);
        assert!(field.is_empty());
    }

    #[test]
    fn wrong_glyph_is_a_no_op() {
        let mut field = love();
        field.push(token(0, 'O', 50.0, 0.3));
        field.push(token(1, 'X', 50.0, 0.3));
        assert_eq!(field.collect(0), CollectOutcome::Ignored);
        assert_eq!(field.collect(1), CollectOutcome::Ignored);
        assert_eq!(field.collect(99), CollectOutcome::Ignored);
        assert!(field.collected().is_empty());
        assert_eq!(field.len(), 2);
    }

    #[test]
    fn collect_removes_only_the_clicked_duplicate() {
        let mut field = love();
        field.push(token(0, 'L', 50.0, 0.3));
        field.push(token(1, 'L', 60.0, 0.3));
        assert_eq!(field.collect(1), CollectOutcome::Collected);
        let ids: Vec<u32> = field.tokens().map(|t| t.id).collect();
        assert_eq!(ids, vec![0]);
        // The remaining L is no longer needed.
        assert_eq!(field.collect(0), CollectOutcome::Ignored);
    }

    #[test]
    fn completion_is_reported_once() {
        let mut field = LetterField::new(vec!['E']);
        field.push(token(0, 'E', 50.0, 0.3));
        field.push(token(1, 'E', 50.0, 0.3));
        assert!(matches!(field.collect(0), CollectOutcome::Completed { .. }));
        assert_eq!(field.collect(1), CollectOutcome::Ignored);
    }

    #[test]
    fn token_at_hits_topmost_disc() {
        let mut field = love();
        field.push(token(0, 'A', 0.0, 0.3));
        field.push(token(1, 'B', 0.0, 0.3));
        // 400x300 field; x=50% -> 200px, y=0 -> disc centre 24px above bottom.
        assert_eq!(field.token_at(200.0, 276.0, 400.0, 300.0), Some(1));
        assert_eq!(field.token_at(200.0 + 23.0, 276.0, 400.0, 300.0), Some(1));
        assert_eq!(field.token_at(200.0 + 30.0, 276.0, 400.0, 300.0), None);
        assert_eq!(field.token_at(10.0, 10.0, 400.0, 300.0), None);
    }

    #[test]
    fn prompt_tracks_needed_glyph() {
        let mut field = LetterField::new(vec!['O', 'K']);
        assert_eq!(field.prompt(), "Find the letter O to continue");
        field.push(token(0, 'O', 50.0, 0.3));
        field.collect(0);
        assert_eq!(field.prompt(), "Find the letter K to continue");
        field.push(token(1, 'K', 50.0, 0.3));
        field.collect(1);
        assert_eq!(field.prompt(), "Find the letter ! to continue");
    }
}
