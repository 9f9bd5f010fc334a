use proptest::prelude::*;
use stellar_evolution::relations::Fate;
use stellar_evolution::star::{LifecycleEvent, Stage, Star, StarId};

fn midpoint(a: f64, b: f64) -> f64 {
    0.5 * (a + b)
}

#[test]
fn new_star_clamps_mass_and_starts_at_zero() {
    let light = Star::new(0.01);
    assert_eq!(light.initial_mass(), 0.1);
    assert_eq!(light.mass(), 0.1);
    assert_eq!(light.age(), 0.0);

    let heavy = Star::new(80.0);
    assert_eq!(heavy.initial_mass(), 50.0);
    assert_eq!(heavy.fate(), Fate::BlackHole);
    assert!(!heavy.is_ended());
}

#[test]
fn stages_follow_phase_boundaries() {
    let mut star = Star::new(1.0);
    let d = *star.durations();
    assert_eq!(star.stage(), Stage::Protostar);

    star.set_age(midpoint(d.zams_age(), d.terminal_main_sequence_age()));
    assert_eq!(star.stage(), Stage::MainSequence);

    star.set_age(midpoint(d.terminal_main_sequence_age(), d.total_years));
    assert_eq!(star.stage(), Stage::Giant);
    assert_eq!(star.display().stage_label(), "Giant");

    star.advance(StarId::Primary, d.total_years);
    assert_eq!(star.stage(), Stage::Remnant(Fate::WhiteDwarf));
    assert_eq!(star.display().stage_label(), "White Dwarf");
}

#[test]
fn massive_stars_become_supergiants() {
    let mut star = Star::new(12.0);
    let d = *star.durations();
    star.set_age(midpoint(d.terminal_main_sequence_age(), d.total_years));
    assert_eq!(star.stage(), Stage::Supergiant);
}

#[test]
fn giant_branch_follows_initial_mass_not_current_mass() {
    let mut star = Star::new(9.0);
    star.set_mass(7.0);
    assert_eq!(star.fate(), Fate::WhiteDwarf);
    let d = *star.durations();
    star.set_age(midpoint(d.terminal_main_sequence_age(), d.total_years));
    assert_eq!(star.stage(), Stage::Supergiant);

    let mut star = Star::new(7.0);
    star.set_mass(9.0);
    assert_eq!(star.fate(), Fate::NeutronStar);
    let d = *star.durations();
    star.set_age(midpoint(d.terminal_main_sequence_age(), d.total_years));
    assert_eq!(star.stage(), Stage::Giant);
}

#[test]
fn end_of_life_clamps_age_and_fires_once() {
    let mut star = Star::new(1.0);
    let total = star.total_lifetime();

    let event = star.advance(StarId::Primary, total * 3.0);
    assert_eq!(
        event,
        Some(LifecycleEvent::EndOfLife {
            star: StarId::Primary,
            fate: Fate::WhiteDwarf,
            supernova: false,
        })
    );
    assert!(star.is_ended());
    assert!(star.just_ended());
    assert_eq!(star.age(), total);
    assert!(star.collapse().animating);
    assert_eq!(star.collapse().progress, 0.0);

    let again = star.advance(StarId::Primary, 1.0e9);
    assert_eq!(again, None);
    assert_eq!(star.age(), total);
    assert!(!star.just_ended());
}

#[test]
fn exact_remaining_step_ends_the_star() {
    let mut star = Star::new(2.0);
    star.advance(StarId::Secondary, 0.75 * star.total_lifetime());
    assert!(!star.is_ended());
    let remaining = star.total_lifetime() - star.age();
    let event = star.advance(StarId::Secondary, remaining);
    assert!(matches!(
        event,
        Some(LifecycleEvent::EndOfLife {
            star: StarId::Secondary,
            ..
        })
    ));
    assert_eq!(star.age(), star.total_lifetime());
}

#[test]
fn supernova_is_flagged_once_for_massive_progenitors() {
    let mut star = Star::new(20.0);
    let event = star.advance(StarId::Primary, star.total_lifetime());
    assert_eq!(
        event,
        Some(LifecycleEvent::EndOfLife {
            star: StarId::Primary,
            fate: Fate::BlackHole,
            supernova: true,
        })
    );
    assert!(star.had_supernova());
    for _ in 0..5 {
        assert_eq!(star.advance(StarId::Primary, 1.0e6), None);
        assert!(star.had_supernova());
    }
}

#[test]
fn low_mass_stars_never_go_supernova() {
    let mut star = Star::new(1.0);
    let event = star.advance(StarId::Primary, 1.0e12);
    assert!(matches!(
        event,
        Some(LifecycleEvent::EndOfLife {
            supernova: false,
            ..
        })
    ));
    assert!(!star.had_supernova());
}

#[test]
fn negative_or_non_finite_steps_do_not_rewind() {
    let mut star = Star::new(1.0);
    star.advance(StarId::Primary, 1.0e9);
    star.advance(StarId::Primary, -5.0e8);
    star.advance(StarId::Primary, f64::NAN);
    star.advance(StarId::Primary, f64::NEG_INFINITY);
    assert_eq!(star.age(), 1.0e9);
    assert!(!star.is_ended());
}

#[test]
fn infinite_step_reaches_end_of_life() {
    let mut star = Star::new(1.0);
    let event = star.advance(StarId::Primary, f64::INFINITY);
    assert!(event.is_some());
    assert!(star.is_ended());
    assert_eq!(star.age(), star.total_lifetime());
}

#[test]
fn set_age_clamps_without_side_effects() {
    let mut star = Star::new(1.0);
    star.set_age(-10.0);
    assert_eq!(star.age(), 0.0);

    star.set_age(1.0e20);
    assert_eq!(star.age(), star.total_lifetime());
    assert!(!star.is_ended());
    assert!(!star.just_ended());

    // the transition happens on the next advance, not during the scrub
    let event = star.advance(StarId::Primary, 0.0);
    assert!(event.is_some());
    assert!(star.is_ended());
}

#[test]
fn ended_star_keeps_its_age_when_scrubbed() {
    let mut star = Star::new(1.0);
    star.advance(StarId::Primary, 1.0e12);
    star.set_age(1.0e9);
    assert_eq!(star.age(), star.total_lifetime());
}

#[test]
fn display_is_a_pure_projection() {
    let mut star = Star::new(3.0);
    star.advance(StarId::Primary, 1.0e7);
    let before = star.clone();
    let first = star.display();
    let second = star.display();
    assert_eq!(first, second);
    assert_eq!(star, before);
}

#[test]
fn remnant_radius_waits_for_the_collapse() {
    let mut star = Star::new(12.0);
    star.advance(StarId::Primary, 1.0e12);
    assert_eq!(star.remnant_radius(), None);
    assert_eq!(star.final_compact_radius(), 1.5e-5);

    star.advance_collapse(500.0, 1_000.0);
    assert_eq!(star.collapse().progress, 0.5);
    assert!(star.collapse().animating);
    assert_eq!(star.remnant_radius(), None);

    star.advance_collapse(900.0, 1_000.0);
    assert_eq!(star.collapse().progress, 1.0);
    assert!(!star.collapse().animating);
    assert_eq!(star.remnant_radius(), Some(1.5e-5));
}

#[test]
fn mass_change_rescales_lifetime_but_not_age() {
    let mut star = Star::new(1.0);
    star.advance(StarId::Primary, 5.0e9);
    let fraction = star.life_fraction();
    let total = star.total_lifetime();

    star.set_mass(1.5);
    assert_eq!(star.age(), 5.0e9);
    assert!(star.total_lifetime() < total);
    assert!(star.life_fraction() > fraction);
}

#[test]
fn set_mass_never_goes_below_the_floor() {
    let mut star = Star::new(0.5);
    star.set_mass(-1.0);
    assert_eq!(star.mass(), 0.1);
}

proptest! {
    #[test]
    fn display_never_mutates(mass in 0.1f64..=50.0, fraction in 0.0f64..1.5) {
        let mut star = Star::new(mass);
        let step = fraction * star.total_lifetime();
        star.advance(StarId::Primary, step);
        let before = star.clone();
        prop_assert_eq!(star.display(), star.display());
        prop_assert_eq!(star, before);
    }

    #[test]
    fn age_never_exceeds_lifetime(mass in 0.1f64..=50.0, steps in prop::collection::vec(0.0f64..5.0e9, 1..20)) {
        let mut star = Star::new(mass);
        let mut events = 0;
        for dt in steps {
            events += usize::from(star.advance(StarId::Primary, dt).is_some());
            prop_assert!(star.age() <= star.total_lifetime());
        }
        prop_assert!(events <= 1);
        prop_assert_eq!(events == 1, star.is_ended());
    }
}
