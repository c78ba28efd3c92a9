//! # 补间生命周期集成测试
//!
//! 以自定义目标对象驱动 TweenAction 的完整流程：
//! 构造 → start → step ... step(1.0)，以及 clone / reverse。

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tween_core::{
    Animatable, CompoundValue, EasingRegistry, PropertyValue, PropertyWrapper, RawProperties,
    TweenAction, TweenDefinition, TweenOptions, TweenState, TweenWarning,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn registry() -> Rc<EasingRegistry> {
    Rc::new(EasingRegistry::with_builtins())
}

/// 三维向量字段：写入时逐个复制子字段，不保留引用
#[derive(Debug, Clone, Copy, PartialEq)]
struct Vec3 {
    x: f32,
    y: f32,
    z: f32,
}

/// 测试用精灵
#[derive(Debug)]
struct Sprite {
    opacity: Cell<f32>,
    position: RefCell<Vec3>,
    writes: RefCell<Vec<String>>,
}

impl Sprite {
    fn new(opacity: f32, position: Vec3) -> Rc<Self> {
        Rc::new(Self {
            opacity: Cell::new(opacity),
            position: RefCell::new(position),
            writes: RefCell::new(Vec::new()),
        })
    }

    fn position(&self) -> Vec3 {
        *self.position.borrow()
    }
}

impl Animatable for Sprite {
    fn get_property(&self, name: &str) -> Option<PropertyValue> {
        match name {
            "opacity" => Some(PropertyValue::Number(self.opacity.get())),
            "position" => {
                let p = self.position();
                Some(PropertyValue::compound(
                    CompoundValue::new()
                        .with("x", p.x)
                        .with("y", p.y)
                        .with("z", p.z),
                ))
            }
            _ => None,
        }
    }

    fn set_property(&self, name: &str, value: PropertyValue) -> bool {
        match (name, value) {
            ("opacity", PropertyValue::Number(v)) => {
                self.writes.borrow_mut().push("opacity".to_string());
                self.opacity.set(v);
                true
            }
            ("position", PropertyValue::Compound(c)) => {
                let c = c.borrow();
                let mut p = self.position.borrow_mut();
                for (key, v) in c.iter() {
                    self.writes.borrow_mut().push(format!("position.{key}"));
                    match key {
                        "x" => p.x = v,
                        "y" => p.y = v,
                        "z" => p.z = v,
                        _ => {}
                    }
                }
                true
            }
            _ => false,
        }
    }
}

fn origin() -> Vec3 {
    Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    }
}

fn run(action: &mut TweenAction<Sprite>, target: &Rc<Sprite>, steps: &[f32]) {
    action.start(Some(target.clone()));
    for &t in steps {
        action.step(t);
    }
}

#[test]
fn test_absolute_tween_lands_on_values() {
    init_tracing();
    let sprite = Sprite::new(1.0, origin());
    let props = RawProperties::new()
        .with("opacity", 0.25)
        .with("position", CompoundValue::new().with("x", 8.0).with("y", -4.0));
    let mut action = TweenAction::new(0.3, props, TweenOptions::new(), registry());

    run(&mut action, &sprite, &[0.0, 0.5, 1.0]);

    assert_eq!(sprite.opacity.get(), 0.25);
    assert_eq!(
        sprite.position(),
        Vec3 {
            x: 8.0,
            y: -4.0,
            z: 0.0
        }
    );
    assert_eq!(action.state(), TweenState::Complete);
}

#[test]
fn test_relative_forward_and_reverse_round_trip() {
    init_tracing();
    let sprite = Sprite::new(0.5, origin());
    let props = RawProperties::new().with("position", CompoundValue::new().with("x", 2.0));
    let options = TweenOptions::new().with_relative(true);
    let mut forward = TweenAction::new(1.0, props, options, registry());

    run(&mut forward, &sprite, &[0.5, 1.0]);
    assert_eq!(sprite.position().x, 2.0);

    let mut backward = forward.reverse();
    run(&mut backward, &sprite, &[0.5, 1.0]);
    assert_eq!(sprite.position().x, 0.0);

    let mut again = backward.reverse();
    run(&mut again, &sprite, &[1.0]);
    assert_eq!(sprite.position().x, 2.0);
}

#[test]
fn test_nan_sub_key_is_never_written() {
    init_tracing();
    let sprite = Sprite::new(
        1.0,
        Vec3 {
            x: 0.0,
            y: 0.0,
            z: f32::NAN,
        },
    );
    let props = RawProperties::new().with(
        "position",
        CompoundValue::new().with("x", 1.0).with("y", 1.0).with("z", 1.0),
    );
    let mut action = TweenAction::new(1.0, props, TweenOptions::new(), registry());

    run(&mut action, &sprite, &[0.3, 0.6, 1.0]);

    assert!(sprite.position().z.is_nan());
    assert!(!sprite.writes.borrow().contains(&"position.z".to_string()));
    assert_eq!(sprite.position().x, 1.0);
}

#[test]
fn test_clone_matches_original_results() {
    init_tracing();
    let props = RawProperties::new()
        .with("opacity", PropertyWrapper::new(0.0).with_easing("cubicOut"))
        .with("position", CompoundValue::new().with("y", 10.0));
    let options = TweenOptions::new().with_easing("Sinusoidal-InOut");
    let mut original = TweenAction::new(2.0, props, options, registry());
    let mut copy = original.clone();

    let (a, b) = (Sprite::new(1.0, origin()), Sprite::new(1.0, origin()));
    let steps = [0.1, 0.4, 0.7];
    run(&mut original, &a, &steps);
    run(&mut copy, &b, &steps);

    assert_eq!(a.opacity.get(), b.opacity.get());
    assert_eq!(a.position(), b.position());
    assert_eq!(copy.duration(), 2.0);
}

#[test]
fn test_reverse_of_absolute_action_is_inert() {
    init_tracing();
    let sprite = Sprite::new(1.0, origin());
    let mut source = TweenAction::new(
        1.0,
        RawProperties::new().with("opacity", 0.0),
        TweenOptions::new(),
        registry(),
    );
    run(&mut source, &sprite, &[0.5]);

    let mut reversed = source.reverse();
    assert_eq!(reversed.duration(), 0.0);
    assert!(reversed.specs().is_empty());
    assert!(reversed.warnings().contains(&TweenWarning::NonRelativeReverse));

    // 空动作不会写任何属性
    let writes_before = sprite.writes.borrow().len();
    run(&mut reversed, &sprite, &[1.0]);
    assert_eq!(sprite.writes.borrow().len(), writes_before);

    // 原动作的运行时状态不受影响
    assert_eq!(source.state(), TweenState::Running);
    assert_eq!(source.property_state("opacity").unwrap().scalar_end(), Some(0.0));
}

#[test]
fn test_on_complete_only_on_exact_one() {
    init_tracing();
    let completed = Rc::new(Cell::new(0));
    let updates = Rc::new(Cell::new(0));
    let (c, u) = (completed.clone(), updates.clone());
    let options = TweenOptions::new()
        .on_update(move |_: &Sprite, _| u.set(u.get() + 1))
        .on_complete(move |_: &Sprite| c.set(c.get() + 1));
    let sprite = Sprite::new(1.0, origin());
    let mut action = TweenAction::new(
        1.0,
        RawProperties::new().with("opacity", 0.0),
        options,
        registry(),
    );

    run(&mut action, &sprite, &[0.0, 0.5, 0.99]);
    assert_eq!(completed.get(), 0);
    assert_eq!(updates.get(), 3);

    action.step(1.0);
    assert_eq!(completed.get(), 1);
    assert_eq!(updates.get(), 4);

    // 重新开始后可以再次完成
    run(&mut action, &sprite, &[1.0]);
    assert_eq!(completed.get(), 2);
}

#[test]
fn test_on_start_sees_mutation_target() {
    init_tracing();
    let seen = Rc::new(Cell::new(f32::NAN));
    let s = seen.clone();
    let options = TweenOptions::new().on_start(move |sprite: &Sprite| s.set(sprite.opacity.get()));
    let mut action = TweenAction::new(
        1.0,
        RawProperties::new().with("opacity", 0.0),
        options,
        registry(),
    );

    let logical = Sprite::new(0.1, origin());
    let worker = Sprite::new(0.9, origin());
    action.set_mutation_target(Some(worker.clone()));
    action.start(Some(logical));

    assert_eq!(seen.get(), 0.9);
}

#[test]
fn test_definition_drives_custom_target() {
    init_tracing();
    let def = TweenDefinition::from_json(
        r#"{
            "duration": 1,
            "props": { "opacity": 0.5, "position": { "x": 4 }, "missing": 1 },
            "options": { "relative": true, "easing": "Linear-None", "delay": 1 }
        }"#,
    )
    .unwrap();
    let mut action: TweenAction<Sprite> = def.build(registry());
    assert_eq!(action.warnings(), &[TweenWarning::deprecated("delay")]);

    let sprite = Sprite::new(0.25, origin());
    run(&mut action, &sprite, &[1.0]);

    assert_eq!(sprite.opacity.get(), 0.75);
    assert_eq!(sprite.position().x, 4.0);
    assert!(action.property_state("missing").is_none());
}
