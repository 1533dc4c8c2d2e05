//! Property transitions: typed animated values, easing, parallel groups.
//!
//! A widget whose cascade carries a `transition` declaration owns one
//! [`AnimationGroup`]. Every style recomputation passes the resolved map
//! through [`AnimationGroup::filter`], which retargets animations whose
//! resolved value moved and substitutes the live interpolated value.

use std::fmt;
use std::time::Duration;

use crate::css::cascade::{Cascade, ResolvedStyle};
use crate::css::values::{parse_duration, parse_float, parse_length, Color, ValueError};
use crate::error::ConfigError;

/// Interpolation curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Quadratic deceleration.
    EaseOut,
    /// Quadratic acceleration then deceleration.
    EaseInOut,
}

impl Easing {
    pub fn parse(src: &str) -> Result<Self, ConfigError> {
        match src {
            "linear" => Ok(Easing::Linear),
            "ease-out" => Ok(Easing::EaseOut),
            "ease-in-out" => Ok(Easing::EaseInOut),
            other => Err(ConfigError::UnsupportedEasing(other.to_owned())),
        }
    }

    /// Map linear progress `t` in `0..=1` onto the curve.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

/// Value type of an animatable property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Color,
    Int,
    Float,
}

impl PropertyKind {
    /// The kind of a transitionable property, by name.
    pub fn for_property(name: &str) -> Result<Self, ConfigError> {
        match name {
            "background" | "color" => Ok(PropertyKind::Color),
            "rotate" => Ok(PropertyKind::Float),
            "border-radius" | "margin-top" | "margin-bottom" => Ok(PropertyKind::Int),
            other => Err(ConfigError::UnsupportedTransitionProperty(other.to_owned())),
        }
    }

    /// Parse a raw declaration value as this kind.
    pub fn parse_value(self, src: &str) -> Result<AnimatedValue, ValueError> {
        Ok(match self {
            PropertyKind::Color => AnimatedValue::Color(Color::parse(src)?),
            PropertyKind::Int => AnimatedValue::Int(parse_length(src)?),
            PropertyKind::Float => AnimatedValue::Float(parse_float(src)?),
        })
    }

    /// The starting value when no unconditional source exists.
    pub fn zero(self) -> AnimatedValue {
        match self {
            PropertyKind::Color => AnimatedValue::Color(Color::TRANSPARENT),
            PropertyKind::Int => AnimatedValue::Int(0),
            PropertyKind::Float => AnimatedValue::Float(0.0),
        }
    }
}

/// A typed, interpolatable property value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimatedValue {
    Color(Color),
    Int(i32),
    Float(f32),
}

impl AnimatedValue {
    /// Interpolate toward `end` by `t`. Mismatched kinds snap to `end`.
    pub fn lerp(self, end: AnimatedValue, t: f32) -> AnimatedValue {
        match (self, end) {
            (AnimatedValue::Color(a), AnimatedValue::Color(b)) => AnimatedValue::Color(a.blend(b, t)),
            (AnimatedValue::Int(a), AnimatedValue::Int(b)) => {
                AnimatedValue::Int((a as f32 + (b - a) as f32 * t).round() as i32)
            }
            (AnimatedValue::Float(a), AnimatedValue::Float(b)) => AnimatedValue::Float(a + (b - a) * t),
            (_, end) => end,
        }
    }
}

impl fmt::Display for AnimatedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnimatedValue::Color(color) => write!(f, "{color}"),
            AnimatedValue::Int(n) => write!(f, "{n}px"),
            AnimatedValue::Float(x) => write!(f, "{x}"),
        }
    }
}

/// One entry of a `transition` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionSpec {
    pub property: String,
    pub kind: PropertyKind,
    pub duration: Duration,
    pub easing: Easing,
}

impl TransitionSpec {
    /// Parse `"<property> <duration> <easing>[, ...]"`.
    pub fn parse_list(src: &str) -> Result<Vec<TransitionSpec>, ConfigError> {
        src.split(',').map(|entry| Self::parse(entry.trim())).collect()
    }

    fn parse(entry: &str) -> Result<TransitionSpec, ConfigError> {
        let parts: Vec<&str> = entry.split_whitespace().collect();
        let [property, duration, easing] = parts.as_slice() else {
            return Err(ConfigError::MalformedTransition(entry.to_owned()));
        };
        let kind = PropertyKind::for_property(property)?;
        let easing = Easing::parse(easing)?;
        let duration = parse_duration(duration).map_err(|source| ConfigError::InvalidValue {
            property: "transition".to_owned(),
            value: (*duration).to_owned(),
            source,
        })?;
        Ok(TransitionSpec {
            property: (*property).to_owned(),
            kind,
            duration,
            easing,
        })
    }
}

/// A typed property holding the live (possibly mid-animation) value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatableProperty {
    pub kind: PropertyKind,
    pub current: AnimatedValue,
}

impl AnimatableProperty {
    pub fn new(kind: PropertyKind, initial: Option<AnimatedValue>) -> Self {
        Self {
            kind,
            current: initial.unwrap_or_else(|| kind.zero()),
        }
    }
}

/// Interpolation of one property from `start` to `end`.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyAnimation {
    pub property: String,
    pub value: AnimatableProperty,
    pub start: AnimatedValue,
    pub end: AnimatedValue,
    pub duration: Duration,
    pub easing: Easing,
}

impl PropertyAnimation {
    /// An idle animation resting at `value.current`.
    pub fn new(spec: TransitionSpec, value: AnimatableProperty) -> Self {
        Self {
            property: spec.property,
            value,
            start: value.current,
            end: value.current,
            duration: spec.duration,
            easing: spec.easing,
        }
    }

    fn progress(&self, elapsed: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Value at `elapsed` since the last (re)start. Exactly `end` once complete.
    fn sample(&self, elapsed: Duration) -> AnimatedValue {
        let t = self.progress(elapsed);
        if t >= 1.0 {
            self.end
        } else {
            self.start.lerp(self.end, self.easing.apply(t))
        }
    }
}

/// A widget's animations, started and stopped together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationGroup {
    animations: Vec<PropertyAnimation>,
    elapsed: Duration,
    running: bool,
}

impl AnimationGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a group for `specs` against the widget's cascade.
    ///
    /// Every source value of each animated property must parse as the
    /// property's kind. The initial value comes from the highest-priority
    /// source without stateful conditions.
    pub fn build(specs: Vec<TransitionSpec>, cascade: &Cascade) -> Result<Self, ConfigError> {
        let mut group = Self::new();
        for spec in specs {
            let mut initial = None;
            for source in cascade.sources(&spec.property) {
                let parsed = spec.kind.parse_value(&source.value).map_err(|source_err| {
                    ConfigError::InvalidValue {
                        property: spec.property.clone(),
                        value: source.value.clone(),
                        source: source_err,
                    }
                })?;
                if initial.is_none() && !source.is_stateful() {
                    initial = Some(parsed);
                }
            }
            let value = AnimatableProperty::new(spec.kind, initial);
            group.push(PropertyAnimation::new(spec, value));
        }
        Ok(group)
    }

    /// Add an animation. A later animation for the same property replaces
    /// the earlier one.
    pub fn push(&mut self, animation: PropertyAnimation) {
        self.animations.retain(|a| a.property != animation.property);
        self.animations.push(animation);
    }

    pub fn get(&self, property: &str) -> Option<&PropertyAnimation> {
        self.animations.iter().find(|a| a.property == property)
    }

    pub fn contains(&self, property: &str) -> bool {
        self.get(property).is_some()
    }

    /// Kind of an animated property.
    pub fn kind_of(&self, property: &str) -> Option<PropertyKind> {
        self.get(property).map(|a| a.value.kind)
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Retarget animations to the resolved values and substitute the live
    /// values into `resolved`.
    ///
    /// Returns whether the group was (re)started.
    pub fn filter(&mut self, resolved: &mut ResolvedStyle) -> bool {
        let mut retargeted = false;
        for animation in &mut self.animations {
            let Some(raw) = resolved.get(&animation.property) else {
                continue;
            };
            match animation.value.kind.parse_value(raw) {
                Ok(target) if target != animation.end => {
                    animation.end = target;
                    retargeted = true;
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(property = %animation.property, %err, "skipping transition target");
                }
            }
        }

        if retargeted {
            self.restart();
        }

        for animation in &self.animations {
            if let Some(value) = resolved.get_mut(&animation.property) {
                *value = animation.value.current.to_string();
            }
        }
        retargeted
    }

    /// Restart every animation from its current value.
    fn restart(&mut self) {
        self.elapsed = Duration::ZERO;
        self.running = false;
        for animation in &mut self.animations {
            animation.start = animation.value.current;
            if animation.duration.is_zero() {
                animation.value.current = animation.end;
            } else {
                self.running |= animation.start != animation.end;
            }
        }
    }

    /// Advance by `dt`. Returns whether any live value changed.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed += dt;
        let mut changed = false;
        let mut finished = true;
        for animation in &mut self.animations {
            let next = animation.sample(self.elapsed);
            if next != animation.value.current {
                animation.value.current = next;
                changed = true;
            }
            finished &= animation.progress(self.elapsed) >= 1.0;
        }
        if finished {
            self.running = false;
        }
        changed
    }
}
