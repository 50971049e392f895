//! Decision policies: anything that turns a perception into an action.
//!
//! The harness only sees `DecisionPolicy`; a human at the keyboard, a lookup
//! rule and a trained network are interchangeable behind it.

use crate::constants::*;
use crate::types::*;

pub trait DecisionPolicy {
    /// Static identifier of the policy implementation.
    fn kind(&self) -> &'static str;

    /// Choose this tick's action.
    fn decide(&mut self, perception: &Perception) -> ActionSignal;
}

impl<P: DecisionPolicy + ?Sized> DecisionPolicy for Box<P> {
    fn kind(&self) -> &'static str {
        (**self).kind()
    }

    fn decide(&mut self, perception: &Perception) -> ActionSignal {
        (**self).decide(perception)
    }
}

/// Current state of the "up" and "down" controls, polled once per tick.
pub trait InputSource {
    fn poll(&mut self) -> ActionSignal;
}

impl<F: FnMut() -> ActionSignal> InputSource for F {
    fn poll(&mut self) -> ActionSignal {
        self()
    }
}

/// Reads the input device directly; ignores the perception.
pub struct HumanPolicy<I> {
    input: I,
}

impl<I: InputSource> HumanPolicy<I> {
    pub fn new(input: I) -> Self {
        HumanPolicy { input }
    }
}

impl<I: InputSource> DecisionPolicy for HumanPolicy<I> {
    fn kind(&self) -> &'static str {
        "human"
    }

    fn decide(&mut self, _perception: &Perception) -> ActionSignal {
        self.input.poll()
    }
}

/// Map continuous outputs to intents. Non-finite values never fire.
pub fn threshold(outputs: [f64; ACTION_COUNT]) -> ActionSignal {
    let fires = |v: f64| v.is_finite() && v > ACTION_THRESHOLD;
    ActionSignal {
        wants_up: fires(outputs[0]),
        wants_down: fires(outputs[1]),
    }
}

/// Wraps a function from features to [up, down] scores.
pub struct FunctionPolicy<F> {
    f: F,
}

impl<F> FunctionPolicy<F>
where
    F: FnMut(&Perception) -> [f64; ACTION_COUNT],
{
    pub fn new(f: F) -> Self {
        FunctionPolicy { f }
    }
}

impl<F> DecisionPolicy for FunctionPolicy<F>
where
    F: FnMut(&Perception) -> [f64; ACTION_COUNT],
{
    fn kind(&self) -> &'static str {
        "function"
    }

    fn decide(&mut self, perception: &Perception) -> ActionSignal {
        threshold((self.f)(perception))
    }
}

/// Never acts.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdlePolicy;

impl DecisionPolicy for IdlePolicy {
    fn kind(&self) -> &'static str {
        "idle"
    }

    fn decide(&mut self, _perception: &Perception) -> ActionSignal {
        NO_ACTION
    }
}

/// Hand-written rule: jump over low obstacles and duck under high ones once
/// they come within `reach` (normalised distance).
#[derive(Clone, Copy, Debug)]
pub struct ReflexPolicy {
    pub reach: f64,
}

impl Default for ReflexPolicy {
    fn default() -> Self {
        ReflexPolicy { reach: 0.16 }
    }
}

impl DecisionPolicy for ReflexPolicy {
    fn kind(&self) -> &'static str {
        "reflex"
    }

    fn decide(&mut self, p: &Perception) -> ActionSignal {
        if *p == Perception::ZERO || p.distance() > self.reach {
            return NO_ACTION;
        }
        // Flyers are the only obstacles shorter than 0.7 (70 px).
        if p.obstacle_height() < 0.7 {
            DOWN
        } else {
            UP
        }
    }
}
