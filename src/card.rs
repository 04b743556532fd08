use crate::defs::{CARD_CELLS, GRID_SIDE};
use crate::error::{BingoError, Result};
use crate::pool::PhotoPool;

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{rng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Nine photos laid out row by row on a 3×3 grid.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Card {
    cells: [String; CARD_CELLS],
}

impl Card {
    pub fn new(cells: Vec<String>) -> Result<Self> {
        let len = cells.len();
        let cells: [String; CARD_CELLS] = cells
            .try_into()
            .map_err(|_| BingoError::InvalidCardSize(len))?;
        Ok(Card { cells })
    }

    pub fn cells(&self) -> &[String; CARD_CELLS] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }

    pub fn position_of(&self, entry: &str) -> Option<usize> {
        self.cells.iter().position(|cell| cell == entry)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.cells.chunks(GRID_SIDE)
    }

    /// Content hash, stable for the same nine photos in the same order.
    pub fn id(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.cells.hash(&mut hasher);
        hasher.finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CardDealer;

impl CardDealer {
    pub fn new() -> Self {
        Self
    }

    /// The `count` photos a card is drawn from, in selection order.
    ///
    /// Priority photos are used alone when there are at least `count` of them,
    /// otherwise the remainder comes from the other photos. The same `seed`
    /// always yields the same candidates for the same pool.
    pub fn candidates(&self, pool: &PhotoPool, count: usize, seed: Option<u64>) -> Result<Vec<String>> {
        let mut candidates = match seed {
            Some(seed) => shuffled_candidates(pool, count, &mut StdRng::seed_from_u64(seed)),
            None => shuffled_candidates(pool, count, &mut rng()),
        };

        if candidates.len() < count {
            return Err(BingoError::InsufficientPool { required: count, available: candidates.len() });
        }
        candidates.truncate(count);
        Ok(candidates)
    }

    /// Deal one card. The arrangement is shuffled with a fresh RNG after
    /// selection, so players sharing a seed share photos but not layouts.
    pub fn deal_card(&self, pool: &PhotoPool, seed: Option<u64>) -> Result<Card> {
        let mut selected = self.candidates(pool, CARD_CELLS, seed)?;
        selected.shuffle(&mut rng());
        Card::new(selected)
    }

    /// Deal `n` independent cards, as for a printed stack.
    pub fn deal_cards(&self, pool: &PhotoPool, n: usize) -> Result<Vec<Card>> {
        (0..n).map(|_| self.deal_card(pool, None)).collect()
    }

    /// Shared candidate set for a session of many players: priority photos
    /// first, topped up from the others, cut to `size` (at least 9).
    pub fn build_day_pool(&self, pool: &PhotoPool, size: usize, seed: Option<u64>) -> Result<Vec<String>> {
        pool.require(CARD_CELLS)?;
        let size = size.max(CARD_CELLS);

        let (mut day_pool, mut others) = match seed {
            Some(seed) => shuffled_parts(pool, &mut StdRng::seed_from_u64(seed)),
            None => shuffled_parts(pool, &mut rng()),
        };

        if day_pool.len() < size {
            others.truncate(size - day_pool.len());
            day_pool.append(&mut others);
        }
        day_pool.truncate(size);
        Ok(day_pool)
    }

    /// Deal `n` cards, each sampled uniformly from `day_pool`.
    pub fn deal_from_day_pool(&self, day_pool: &[String], n: usize) -> Result<Vec<Card>> {
        if day_pool.len() < CARD_CELLS {
            return Err(BingoError::InsufficientPool { required: CARD_CELLS, available: day_pool.len() });
        }

        let mut rng = rng();
        (0..n)
            .map(|_| {
                let picked = rand::seq::index::sample(&mut rng, day_pool.len(), CARD_CELLS)
                    .into_iter()
                    .map(|i| day_pool[i].clone())
                    .collect();
                Card::new(picked)
            })
            .collect()
    }
}

fn shuffled_parts<R: Rng + ?Sized>(pool: &PhotoPool, rng: &mut R) -> (Vec<String>, Vec<String>) {
    let mut priority = pool.priority().to_vec();
    let mut other = pool.other().to_vec();
    priority.shuffle(rng);
    other.shuffle(rng);
    (priority, other)
}

fn shuffled_candidates<R: Rng + ?Sized>(pool: &PhotoPool, count: usize, rng: &mut R) -> Vec<String> {
    let (mut priority, mut other) = shuffled_parts(pool, rng);
    if priority.len() < count {
        priority.append(&mut other);
    }
    priority
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn pool_of(priority: usize, other: usize) -> PhotoPool {
        let entries = (0..priority)
            .map(|i| format!("priority/p{i:02}.jpg"))
            .chain((0..other).map(|i| format!("misc/o{i:02}.jpg")));
        PhotoPool::new(entries, Some("priority"))
    }

    fn as_set(card: &Card) -> HashSet<String> {
        card.cells().iter().cloned().collect()
    }

    #[test]
    fn test_card_requires_nine_cells() {
        let eight: Vec<String> = (0..8).map(|i| i.to_string()).collect();
        assert!(matches!(Card::new(eight), Err(BingoError::InvalidCardSize(8))));

        let nine: Vec<String> = (0..9).map(|i| i.to_string()).collect();
        let card = Card::new(nine).unwrap();
        assert_eq!(card.get(4), Some("4"));
        assert_eq!(card.get(9), None);
        assert_eq!(card.position_of("7"), Some(7));
        let rows: Vec<&[String]> = card.rows().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], &["3".to_string(), "4".to_string(), "5".to_string()]);
    }

    #[test]
    fn test_card_id_depends_on_content() {
        let a = Card::new((0..9).map(|i| i.to_string()).collect()).unwrap();
        let b = Card::new((0..9).rev().map(|i| i.to_string()).collect()).unwrap();
        assert_eq!(a.id(), a.clone().id());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_deal_card_distinct_entries_from_pool() {
        let pool = pool_of(3, 20);
        let dealer = CardDealer::new();
        for _ in 0..50 {
            let card = dealer.deal_card(&pool, None).unwrap();
            let set = as_set(&card);
            assert_eq!(set.len(), CARD_CELLS);
            assert!(set.iter().all(|entry| pool.contains(entry)));
        }
    }

    #[test]
    fn test_small_priority_subset_is_always_used() {
        let pool = pool_of(4, 20);
        let dealer = CardDealer::new();
        let card = dealer.deal_card(&pool, None).unwrap();
        let set = as_set(&card);
        assert!(pool.priority().iter().all(|p| set.contains(p)));
    }

    #[test]
    fn test_large_priority_subset_excludes_others() {
        let pool = pool_of(12, 20);
        let dealer = CardDealer::new();
        for _ in 0..50 {
            let card = dealer.deal_card(&pool, None).unwrap();
            assert!(card.cells().iter().all(|entry| entry.starts_with("priority/")));
        }
    }

    #[test]
    fn test_same_seed_same_candidates() {
        let pool = pool_of(5, 30);
        let dealer = CardDealer::new();
        let a = dealer.candidates(&pool, CARD_CELLS, Some(20261014)).unwrap();
        let b = dealer.candidates(&pool, CARD_CELLS, Some(20261014)).unwrap();
        assert_eq!(a, b);

        let first = as_set(&dealer.deal_card(&pool, Some(20261014)).unwrap());
        let expected: HashSet<String> = a.into_iter().collect();
        assert_eq!(first, expected);
    }

    #[test]
    fn test_same_seed_arrangement_varies() {
        let pool = pool_of(0, 30);
        let dealer = CardDealer::new();
        let first = dealer.deal_card(&pool, Some(7)).unwrap();
        // 9! arrangements: 20 identical reshuffles in a row is practically impossible
        let varied = (0..20).any(|_| dealer.deal_card(&pool, Some(7)).unwrap() != first);
        assert!(varied);
    }

    #[test]
    fn test_deal_card_insufficient_pool() {
        let pool = pool_of(2, 6);
        let dealer = CardDealer::new();
        match dealer.deal_card(&pool, None) {
            Err(BingoError::InsufficientPool { required, available }) => {
                assert_eq!(required, 9);
                assert_eq!(available, 8);
            }
            other => panic!("expected InsufficientPool, got {other:?}"),
        }
    }

    #[test]
    fn test_deal_cards_count() {
        let pool = pool_of(0, 9);
        let cards = CardDealer::new().deal_cards(&pool, 5).unwrap();
        assert_eq!(cards.len(), 5);
        assert!(cards.iter().all(|c| as_set(c).len() == CARD_CELLS));
    }

    #[test]
    fn test_build_day_pool_prefers_priority() {
        let pool = pool_of(6, 30);
        let dealer = CardDealer::new();
        let day_pool = dealer.build_day_pool(&pool, 15, Some(1)).unwrap();
        assert_eq!(day_pool.len(), 15);
        assert!(pool.priority().iter().all(|p| day_pool.contains(p)));
        assert_eq!(dealer.build_day_pool(&pool, 15, Some(1)).unwrap(), day_pool);

        // sizes below one card are raised to nine
        assert_eq!(dealer.build_day_pool(&pool, 3, None).unwrap().len(), 9);
        // a size above the pool yields the whole pool
        assert_eq!(dealer.build_day_pool(&pool, 100, None).unwrap().len(), 36);
    }

    #[test]
    fn test_build_day_pool_priority_only_when_large() {
        let pool = pool_of(20, 30);
        let day_pool = CardDealer::new().build_day_pool(&pool, 15, None).unwrap();
        assert!(day_pool.iter().all(|e| e.starts_with("priority/")));
    }

    #[test]
    fn test_deal_from_day_pool() {
        let pool = pool_of(0, 30);
        let dealer = CardDealer::new();
        let day_pool = dealer.build_day_pool(&pool, 12, None).unwrap();
        let cards = dealer.deal_from_day_pool(&day_pool, 10).unwrap();
        assert_eq!(cards.len(), 10);
        for card in &cards {
            let set = as_set(card);
            assert_eq!(set.len(), CARD_CELLS);
            assert!(set.iter().all(|e| day_pool.contains(e)));
        }

        let short: Vec<String> = day_pool.into_iter().take(8).collect();
        assert!(matches!(
            dealer.deal_from_day_pool(&short, 1),
            Err(BingoError::InsufficientPool { .. })
        ));
    }
}
