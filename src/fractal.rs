//! Line-subdivision rules and the generation step built on them.
//!
//! A rule maps one directed segment to a short ordered list of replacement
//! segments. A generation applies the rule to every segment independently and
//! concatenates the children in input order.

use std::f64::consts::{FRAC_PI_3, FRAC_PI_4, SQRT_2};
use std::fmt;

use crate::geometry::{Point, Segment};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Right-angle bend through the apex of an isosceles right triangle.
    C,
    /// Same apex as `C`, but the second child points from the end into the apex.
    Dragon,
    /// Equilateral bump on the middle third.
    Koch,
}

impl Rule {
    pub const ALL: [Rule; 3] = [Rule::C, Rule::Dragon, Rule::Koch];

    /// Case-sensitive lookup; `None` for anything that isn't an exact rule name.
    pub fn from_name(name: &str) -> Option<Rule> {
        match name {
            "C" => Some(Rule::C),
            "Dragon" => Some(Rule::Dragon),
            "Koch" => Some(Rule::Koch),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Rule::C => "C",
            Rule::Dragon => "Dragon",
            Rule::Koch => "Koch",
        }
    }

    /// Children produced per input segment.
    pub fn fan_out(&self) -> u64 {
        match self {
            Rule::C | Rule::Dragon => 2,
            Rule::Koch => 4,
        }
    }

    pub fn apply(&self, line: Segment) -> Vec<Segment> {
        match self {
            Rule::C => c_next(line),
            Rule::Dragon => dragon_next(line),
            Rule::Koch => koch_next(line),
        }
    }

    /// Segments in generation `generation` grown from `seeds` segments, or
    /// `None` if the count does not fit in a `u64`.
    pub fn segment_count(&self, seeds: u64, generation: u32) -> Option<u64> {
        self.fan_out()
            .checked_pow(generation)
            .and_then(|n| n.checked_mul(seeds))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Apex shared by the C and Dragon rules: `v` turned -45° and shortened to
/// `|v| * sqrt(2)/2`, measured from `p1`.
fn apex(line: Segment) -> Point {
    let v = line.direction().rotate(-FRAC_PI_4).scale(SQRT_2 / 2.0);
    line.p1.plus(v)
}

fn c_next(line: Segment) -> Vec<Segment> {
    let p = apex(line);
    vec![Segment::new(line.p1, p), Segment::new(p, line.p2)]
}

fn dragon_next(line: Segment) -> Vec<Segment> {
    let p = apex(line);
    // Reversed second child; this is what alternates the folds.
    vec![Segment::new(line.p1, p), Segment::new(line.p2, p)]
}

fn koch_next(line: Segment) -> Vec<Segment> {
    let third = line.direction().scale(1.0 / 3.0);
    let a = line.p1.plus(third);
    let b = line.p1.plus(third.scale(2.0));
    let peak = a.plus(third.rotate(-FRAC_PI_3));
    vec![
        Segment::new(line.p1, a),
        Segment::new(a, peak),
        Segment::new(peak, b),
        Segment::new(b, line.p2),
    ]
}

/// One generation step with an already resolved rule.
pub fn next_generation(rule: Rule, segments: &[Segment]) -> Vec<Segment> {
    let mut next = Vec::with_capacity(segments.len() * rule.fan_out() as usize);
    for line in segments {
        next.extend(rule.apply(*line));
    }
    next
}

/// One generation step by rule name.
///
/// An unknown name is not an error: every segment yields no children, so the
/// result is empty.
pub fn subdivide(rule: &str, segments: &[Segment]) -> Vec<Segment> {
    match Rule::from_name(rule) {
        Some(rule) => next_generation(rule, segments),
        None => Vec::new(),
    }
}

/// Iterator over generations `0..count`, starting with the seed itself.
///
/// Generation `i + 1` is built when generation `i` is handed out, and
/// nothing past `count - 1` is ever built.
#[derive(Clone, Debug)]
pub struct Generations {
    rule: Option<Rule>,
    pending: Option<Vec<Segment>>,
    index: usize,
    count: usize,
}

impl Generations {
    /// `rule == None` behaves like an unknown rule name: every generation
    /// after the seed is empty.
    pub fn new(rule: Option<Rule>, seed: Vec<Segment>, count: usize) -> Self {
        Self {
            rule,
            pending: (count > 0).then_some(seed),
            index: 0,
            count,
        }
    }

    pub fn by_name(rule: &str, seed: Vec<Segment>, count: usize) -> Self {
        Self::new(Rule::from_name(rule), seed, count)
    }

    pub fn rule(&self) -> Option<Rule> {
        self.rule
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl Iterator for Generations {
    type Item = Vec<Segment>;

    fn next(&mut self) -> Option<Vec<Segment>> {
        let current = self.pending.take()?;
        self.index += 1;
        if self.index < self.count {
            self.pending = Some(match self.rule {
                Some(rule) => next_generation(rule, &current),
                None => Vec::new(),
            });
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = if self.pending.is_some() {
            self.count - self.index
        } else {
            0
        };
        (left, Some(left))
    }
}

impl ExactSizeIterator for Generations {}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> Segment {
        Segment::new(pt(x1, y1), pt(x2, y2))
    }

    fn assert_close(a: Point, b: Point) {
        assert!(
            (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS,
            "{a} != {b}"
        );
    }

    fn assert_segments(actual: &[Segment], expected: &[Segment]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert_close(a.p1, e.p1);
            assert_close(a.p2, e.p2);
        }
    }

    #[test]
    fn test_rule_names() {
        for rule in Rule::ALL {
            assert_eq!(Rule::from_name(rule.name()), Some(rule));
            assert_eq!(rule.to_string(), rule.name());
        }
        assert_eq!(Rule::from_name("koch"), None);
        assert_eq!(Rule::from_name("Dragon "), None);
        assert_eq!(Rule::from_name(""), None);
    }

    #[test]
    fn test_c_apex() {
        let out = subdivide("C", &[seg(0.0, 0.0, 2.0, 0.0)]);
        assert_segments(
            &out,
            &[seg(0.0, 0.0, 1.0, -1.0), seg(1.0, -1.0, 2.0, 0.0)],
        );
    }

    #[test]
    fn test_dragon_reverses_second_child() {
        let out = subdivide("Dragon", &[seg(0.0, 0.0, 2.0, 0.0)]);
        assert_segments(
            &out,
            &[seg(0.0, 0.0, 1.0, -1.0), seg(2.0, 0.0, 1.0, -1.0)],
        );
    }

    #[test]
    fn test_koch_bump() {
        let h = (FRAC_PI_3).sin();
        let out = subdivide("Koch", &[seg(0.0, 0.0, 3.0, 0.0)]);
        assert_segments(
            &out,
            &[
                seg(0.0, 0.0, 1.0, 0.0),
                seg(1.0, 0.0, 1.5, -h),
                seg(1.5, -h, 2.0, 0.0),
                seg(2.0, 0.0, 3.0, 0.0),
            ],
        );
        assert!((out[1].p2.y + 0.8660254037844386).abs() < EPS);
    }

    #[test]
    fn test_koch_children_have_equal_length() {
        let line = seg(10.0, 20.0, 70.0, -5.0);
        let third = line.length() / 3.0;
        for child in Rule::Koch.apply(line) {
            assert!((child.length() - third).abs() < EPS);
        }
    }

    #[test]
    fn test_bend_children_have_half_diagonal_length() {
        let line = seg(-4.0, 1.0, 8.0, 6.0);
        let expected = line.length() * SQRT_2 / 2.0;
        for rule in [Rule::C, Rule::Dragon] {
            for child in rule.apply(line) {
                assert!((child.length() - expected).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_endpoint_continuity() {
        let inputs = [
            seg(0.0, 0.0, 1.0, 0.0),
            seg(250.0, 300.0, 550.0, 300.0),
            seg(-3.0, 7.0, 11.5, -2.25),
            seg(5.0, 5.0, 5.0, -10.0),
        ];
        for line in inputs {
            for rule in [Rule::C, Rule::Koch] {
                let out = rule.apply(line);
                assert_eq!(out.first().unwrap().p1, line.p1);
                assert_eq!(out.last().unwrap().p2, line.p2);
                for pair in out.windows(2) {
                    assert_eq!(pair[0].p2, pair[1].p1);
                }
            }
            let dragon = Rule::Dragon.apply(line);
            assert_eq!(dragon[0].p1, line.p1);
            assert_eq!(dragon[1].p1, line.p2);
            assert_eq!(dragon[0].p2, dragon[1].p2);
        }
    }

    #[test]
    fn test_segment_counts() {
        let line = seg(0.0, 0.0, 9.0, 0.0);
        assert_eq!(subdivide("C", &[line]).len(), 2);
        assert_eq!(subdivide("Dragon", &[line]).len(), 2);
        assert_eq!(subdivide("Koch", &[line]).len(), 4);
        assert_eq!(subdivide("Koch", &[line, line, line]).len(), 12);
    }

    #[test]
    fn test_unknown_rule_is_empty() {
        let line = seg(0.0, 0.0, 1.0, 0.0);
        assert!(subdivide("bogus", &[line]).is_empty());
        assert!(subdivide("c", &[line, line]).is_empty());
    }

    #[test]
    fn test_empty_input() {
        for rule in Rule::ALL {
            assert!(next_generation(rule, &[]).is_empty());
        }
    }

    #[test]
    fn test_zero_length_segment() {
        let p = pt(4.0, 4.0);
        for rule in Rule::ALL {
            let out = rule.apply(Segment::new(p, p));
            assert_eq!(out.len() as u64, rule.fan_out());
            for child in out {
                assert_close(child.p1, p);
                assert_close(child.p2, p);
            }
        }
    }

    #[test]
    fn test_order_follows_input() {
        let a = seg(0.0, 0.0, 3.0, 0.0);
        let b = seg(3.0, 0.0, 3.0, 3.0);
        let out = next_generation(Rule::Koch, &[a, b]);
        assert_eq!(&out[..4], Rule::Koch.apply(a).as_slice());
        assert_eq!(&out[4..], Rule::Koch.apply(b).as_slice());
    }

    #[test]
    fn test_deterministic() {
        let seed = vec![seg(250.0, 300.0, 550.0, 300.0)];
        for rule in Rule::ALL {
            let once: Vec<_> = Generations::new(Some(rule), seed.clone(), 6).collect();
            let twice: Vec<_> = Generations::new(Some(rule), seed.clone(), 6).collect();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_generations_growth() {
        let seed = vec![seg(0.0, 0.0, 1.0, 0.0)];
        for rule in Rule::ALL {
            let lens: Vec<usize> = Generations::new(Some(rule), seed.clone(), 7)
                .map(|g| g.len())
                .collect();
            assert_eq!(lens.len(), 7);
            for (n, len) in lens.iter().enumerate() {
                assert_eq!(*len as u64, rule.segment_count(1, n as u32).unwrap());
            }
        }
    }

    #[test]
    fn test_generations_starts_with_seed() {
        let seed = vec![seg(1.0, 2.0, 3.0, 4.0)];
        let mut gens = Generations::by_name("Dragon", seed.clone(), 3);
        assert_eq!(gens.len(), 3);
        assert_eq!(gens.next(), Some(seed.clone()));
        assert_eq!(gens.len(), 2);
        assert_eq!(gens.next(), Some(subdivide("Dragon", &seed)));
        assert_eq!(gens.len(), 1);
        assert!(gens.next().is_some());
        assert_eq!(gens.next(), None);
        assert_eq!(gens.len(), 0);
    }

    #[test]
    fn test_generations_unknown_rule() {
        let seed = vec![seg(0.0, 0.0, 1.0, 0.0)];
        let gens: Vec<_> = Generations::by_name("Sierpinski", seed.clone(), 3).collect();
        assert_eq!(gens, vec![seed, Vec::new(), Vec::new()]);
    }

    #[test]
    fn test_generations_zero_count() {
        let mut gens = Generations::new(Some(Rule::C), vec![seg(0.0, 0.0, 1.0, 0.0)], 0);
        assert_eq!(gens.len(), 0);
        assert_eq!(gens.next(), None);
    }

    #[test]
    fn test_segment_count_overflow() {
        assert_eq!(Rule::Koch.segment_count(1, 10), Some(1_048_576));
        assert_eq!(Rule::C.segment_count(3, 4), Some(48));
        assert_eq!(Rule::Koch.segment_count(1, 32), None);
        assert_eq!(Rule::Dragon.segment_count(2, 63), None);
    }
}
