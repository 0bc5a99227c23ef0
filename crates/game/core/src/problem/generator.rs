//! Level-tiered problem generation.

use crate::env::{Dice, RngOracle};

use super::{MathProblem, ProblemKind};

/// Highest level that still gets addition/subtraction.
const EARLY_TIER_MAX_LEVEL: u32 = 3;
/// Highest level that still gets multiplication.
const MIDDLE_TIER_MAX_LEVEL: u32 = 6;
/// Share of division problems in the late tier; the rest are mixed.
const DIVISION_PERCENT: u32 = 70;

/// Generates a problem for the given player level.
///
/// | Level | Problems |
/// |-------|----------|
/// | 1-3   | 50% `a + b` (a, b in 1..=20), 50% `a - b` (a in 1..=20, b in 1..=a) |
/// | 4-6   | `a × b` (a, b in 2..=12) |
/// | 7+    | 70% `a ÷ b` (b in 2..=12, quotient in 2..=15), 30% `(a + b) × c` |
///
/// Deterministic for a given RNG oracle and dice state; no side effects.
pub fn generate<R: RngOracle + ?Sized>(player_level: u32, dice: &mut Dice<'_, R>) -> MathProblem {
    if player_level <= EARLY_TIER_MAX_LEVEL {
        if dice.chance(50) {
            addition(dice)
        } else {
            subtraction(dice)
        }
    } else if player_level <= MIDDLE_TIER_MAX_LEVEL {
        multiplication(dice)
    } else if dice.chance(DIVISION_PERCENT) {
        division(dice)
    } else {
        mixed(dice)
    }
}

fn addition<R: RngOracle + ?Sized>(dice: &mut Dice<'_, R>) -> MathProblem {
    let a = dice.range(1, 20);
    let b = dice.range(1, 20);
    MathProblem::new(format!("{a} + {b}"), (a + b) as i32, ProblemKind::Addition)
}

fn subtraction<R: RngOracle + ?Sized>(dice: &mut Dice<'_, R>) -> MathProblem {
    let a = dice.range(1, 20);
    let b = dice.range(1, a);
    MathProblem::new(format!("{a} - {b}"), (a - b) as i32, ProblemKind::Subtraction)
}

fn multiplication<R: RngOracle + ?Sized>(dice: &mut Dice<'_, R>) -> MathProblem {
    let a = dice.range(2, 12);
    let b = dice.range(2, 12);
    MathProblem::new(
        format!("{a} × {b}"),
        (a * b) as i32,
        ProblemKind::Multiplication,
    )
}

fn division<R: RngOracle + ?Sized>(dice: &mut Dice<'_, R>) -> MathProblem {
    let divisor = dice.range(2, 12);
    let quotient = dice.range(2, 15);
    let dividend = divisor * quotient;
    MathProblem::new(
        format!("{dividend} ÷ {divisor}"),
        quotient as i32,
        ProblemKind::Division,
    )
}

fn mixed<R: RngOracle + ?Sized>(dice: &mut Dice<'_, R>) -> MathProblem {
    let a = dice.range(5, 15);
    let b = dice.range(2, 8);
    let c = dice.range(3, 10);
    MathProblem::new(
        format!("({a} + {b}) × {c}"),
        ((a + b) * c) as i32,
        ProblemKind::Mixed,
    )
}
