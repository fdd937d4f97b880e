//! Phone transition model.
//!
//! Each [`Phone`] knows how to steer a [`VocalSystem`] from whatever the
//! previous phone left behind into its own sound ([`Phone::encode_beginning`]),
//! and how it colours the start of the phone that follows
//! ([`Phone::formant_pull`] and [`Phone::transition_time`]).
//!
//! All timings here are nominal milliseconds at the default phone rate; the
//! vocal system's tempo scales them.

use std::fmt;
use std::time::Duration;

use formantic_phonetics::PhoneClass;
use serde::{Deserialize, Serialize};

use crate::tracks::Track;
use crate::vocal_system::{FormantState, VocalSystem, VELAR_BURST_HZ};


/// Time for leftover turbulence, hum and liquid to die away.
const RELEASE_MS: f64 = 30.0;
/// Formant fade-in when a sonorant has no predecessor.
pub const FADE_IN_MS: f64 = 50.0;

/// Hold multiplier before a voiceless obstruent.
const PRE_FORTIS_FACTOR: f64 = 0.75;
/// Hold multiplier at the end of a word.
const FINAL_LENGTHENING: f64 = 1.2;

/// Volume of the voicing hum during a voiced closure.
const VOICE_BAR: f64 = 0.06;
/// Volume of the voicing hum under a voiced fricative.
const FRICATIVE_VOICING: f64 = 0.04;
/// Volume of the nasal murmur.
const NASAL_MURMUR: f64 = 0.05;

/// Aspiration level after a voiceless stop.
const ASPIRATION: f64 = 0.08;

/// Alveolar F2 locus in Hz.
const ALVEOLAR_LOCUS: f64 = 1_800.0;

/// Place of articulation of a stop or nasal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Place {
    /// Both lips.
    Bilabial,
    /// Tongue tip against the alveolar ridge.
    Alveolar,
    /// Tongue body against the soft palate.
    Velar,
}

impl Place {
    /// Turbulence channel that carries this place's release burst.
    pub fn burst_channel(&self) -> &'static str {
        match self {
            Place::Bilabial => "B",
            Place::Alveolar => "T",
            Place::Velar => "K",
        }
    }

    /// Formant start a following vowel glides away from.
    ///
    /// Bilabials lower every formant by a tenth, alveolars draw F2 toward
    /// the 1800 Hz locus and lower F1, velars pinch F1 and F2 together.
    fn pull(&self, next: FormantState) -> FormantState {
        let [f1, f2, f3] = next.frequencies;
        let frequencies = match self {
            Place::Bilabial => [f1 * 0.9, f2 * 0.9, f3 * 0.9],
            Place::Alveolar => [f1 * 0.8, f2 + (ALVEOLAR_LOCUS - f2) * 0.5, f3],
            Place::Velar => {
                let mean = (f1 + f2) / 2.0;
                [f1 + (mean - f1) * 0.5, f2 + (mean - f2) * 0.5, f3]
            }
        };
        FormantState {
            frequencies,
            volumes: [0.0; 3],
        }
    }

    fn transition_ms(&self) -> f64 {
        match self {
            Place::Bilabial => 60.0,
            Place::Alveolar => 50.0,
            Place::Velar => 70.0,
        }
    }
}

/// Turbulence channel of a fricative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    /// Alveolar sibilant (`s`, `z`).
    S,
    /// Postalveolar sibilant (`ʃ`, `ʒ`).
    SH,
    /// Dental (`θ`, `ð`).
    TH,
    /// Labiodental (`f`, `v`).
    F,
    /// Glottal aspiration (`h`), shaped by the following vowel.
    H,
}

impl Channel {
    /// Name of the turbulence track this channel drives.
    pub fn name(&self) -> &'static str {
        match self {
            Channel::S => "S",
            Channel::SH => "SH",
            Channel::TH => "TH",
            Channel::F => "F",
            Channel::H => "H",
        }
    }

    fn level(&self) -> f64 {
        match self {
            Channel::S | Channel::SH => 0.15,
            Channel::TH | Channel::F => 0.06,
            Channel::H => 0.1,
        }
    }

    fn pull(&self, next: FormantState) -> FormantState {
        let [f1, f2, f3] = next.frequencies;
        let frequencies = match self {
            Channel::S | Channel::SH => [f1 * 0.9, f2 + (ALVEOLAR_LOCUS - f2) * 0.3, f3],
            Channel::TH | Channel::F => [f1 * 0.95, f2 * 0.95, f3 * 0.95],
            Channel::H => next.frequencies,
        };
        FormantState {
            frequencies,
            volumes: [0.0; 3],
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One phonetic unit of the formant voice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Phone {
    /// Steady formant target held for `duration_ms`.
    Vowel {
        /// Steady-state formants.
        target: FormantState,
        /// Nominal hold time.
        duration_ms: f64,
    },
    /// Semivowel: a brief formant target left slowly.
    Glide {
        /// Formant target.
        target: FormantState,
        /// Nominal hold time.
        duration_ms: f64,
    },
    /// `p`, `b`.
    BilabialPlosive {
        /// Voiced closure.
        voiced: bool,
    },
    /// `t`, `d`.
    AlveolarPlosive {
        /// Voiced closure.
        voiced: bool,
    },
    /// `k`, `g`.
    VelarPlosive {
        /// Voiced closure.
        voiced: bool,
    },
    /// `m`, `n`, `ŋ`.
    Nasal {
        /// Place of the oral closure.
        place: Place,
        /// Nasal formant target.
        resonance: FormantState,
    },
    /// Turbulent airflow on one channel.
    Fricative {
        /// Channel to sound.
        channel: Channel,
        /// Voiced fricative.
        voiced: bool,
    },
    /// Alveolar closure released into `SH` (`ʧ`, `ʤ`).
    Affricate {
        /// Voiced affricate.
        voiced: bool,
    },
    /// `ɹ`.
    RetroflexLiquid {
        /// Formant target.
        resonance: FormantState,
    },
    /// `l`.
    LateralLiquid {
        /// Formant target.
        resonance: FormantState,
    },
    /// `ʔ`: a short silence.
    GlottalStop,
}

/// How a sonorant phone is sustained.
struct Sustain {
    target: FormantState,
    hold: Duration,
    murmur: f64,
    liquid: Option<(f64, f64)>,
}

impl Phone {
    /// Articulatory class of the phone.
    pub fn class(&self) -> PhoneClass {
        match self {
            Phone::Vowel { .. } => PhoneClass::Vowel,
            Phone::Glide { .. } => PhoneClass::Glide,
            Phone::BilabialPlosive { .. }
            | Phone::AlveolarPlosive { .. }
            | Phone::VelarPlosive { .. } => PhoneClass::Stop,
            Phone::Nasal { .. } => PhoneClass::Nasal,
            Phone::Fricative {
                channel: Channel::H,
                ..
            } => PhoneClass::Aspirate,
            Phone::Fricative { .. } => PhoneClass::Fricative,
            Phone::Affricate { .. } => PhoneClass::Affricate,
            Phone::RetroflexLiquid { .. } | Phone::LateralLiquid { .. } => PhoneClass::Liquid,
            Phone::GlottalStop => PhoneClass::GlottalStop,
        }
    }

    /// Whether the vocal folds vibrate during the phone.
    pub fn is_voiced(&self) -> bool {
        match self {
            Phone::BilabialPlosive { voiced }
            | Phone::AlveolarPlosive { voiced }
            | Phone::VelarPlosive { voiced }
            | Phone::Fricative { voiced, .. }
            | Phone::Affricate { voiced } => *voiced,
            Phone::GlottalStop => false,
            _ => true,
        }
    }

    /// Steady formant target, for phones that have one.
    pub fn target(&self) -> Option<FormantState> {
        match self {
            Phone::Vowel { target, .. } | Phone::Glide { target, .. } => Some(*target),
            Phone::Nasal { resonance, .. }
            | Phone::RetroflexLiquid { resonance }
            | Phone::LateralLiquid { resonance } => Some(*resonance),
            _ => None,
        }
    }

    /// The same phone with its hold stretched by `factor`.
    ///
    /// Only vowels have an adjustable hold; every other phone is returned as is.
    pub fn lengthened(self, factor: f64) -> Phone {
        match self {
            Phone::Vowel {
                target,
                duration_ms,
            } => Phone::Vowel {
                target,
                duration_ms: duration_ms * factor,
            },
            other => other,
        }
    }

    /// Formant state the next phone should start from, given its target.
    ///
    /// Sonorants hand over their own end state so the formants continue
    /// without a jump. Obstruents return a shifted, silent version of
    /// `next_target`.
    pub fn formant_pull(&self, next_target: FormantState) -> FormantState {
        match self {
            Phone::Vowel { target, .. } | Phone::Glide { target, .. } => *target,
            Phone::Nasal { resonance, .. }
            | Phone::RetroflexLiquid { resonance }
            | Phone::LateralLiquid { resonance } => *resonance,
            Phone::BilabialPlosive { .. } => Place::Bilabial.pull(next_target),
            Phone::AlveolarPlosive { .. } => Place::Alveolar.pull(next_target),
            Phone::VelarPlosive { .. } => Place::Velar.pull(next_target),
            Phone::Fricative { channel, .. } => channel.pull(next_target),
            Phone::Affricate { .. } => Channel::SH.pull(next_target),
            Phone::GlottalStop => next_target.silent(),
        }
    }

    /// How long the next phone takes to leave this phone's pull.
    pub fn transition_time(&self) -> Duration {
        let millis = match self {
            Phone::Vowel { .. } => 80,
            Phone::Glide { .. } => 100,
            Phone::BilabialPlosive { .. } => Place::Bilabial.transition_ms() as u64,
            Phone::AlveolarPlosive { .. } => Place::Alveolar.transition_ms() as u64,
            Phone::VelarPlosive { .. } => Place::Velar.transition_ms() as u64,
            Phone::Nasal { .. } => 50,
            Phone::Fricative { .. } => 40,
            Phone::Affricate { .. } => 50,
            Phone::RetroflexLiquid { .. } => 90,
            Phone::LateralLiquid { .. } => 70,
            Phone::GlottalStop => 30,
        };
        Duration::from_millis(millis)
    }

    /// Appends this phone to `system`.
    ///
    /// `previous` and `next` are the neighbouring phones within the same
    /// word. Every branch of `system` ends time-aligned.
    pub fn encode_beginning(
        &self,
        system: &mut VocalSystem,
        previous: Option<&Phone>,
        next: Option<&Phone>,
    ) {
        match *self {
            Phone::Vowel {
                target,
                duration_ms,
            } => {
                let hold = system.ms(duration_ms * hold_factor(next));
                encode_sustained(
                    system,
                    previous,
                    Sustain {
                        target,
                        hold,
                        murmur: 0.0,
                        liquid: None,
                    },
                );
            }
            Phone::Glide {
                target,
                duration_ms,
            } => {
                let hold = system.ms(duration_ms);
                encode_sustained(
                    system,
                    previous,
                    Sustain {
                        target,
                        hold,
                        murmur: 0.0,
                        liquid: None,
                    },
                );
            }
            Phone::Nasal { resonance, .. } => {
                let hold = system.ms(70.0 * hold_factor(next));
                encode_sustained(
                    system,
                    previous,
                    Sustain {
                        target: resonance,
                        hold,
                        murmur: NASAL_MURMUR,
                        liquid: None,
                    },
                );
            }
            Phone::LateralLiquid { resonance } => {
                let hold = system.ms(60.0);
                encode_sustained(
                    system,
                    previous,
                    Sustain {
                        target: resonance,
                        hold,
                        murmur: 0.0,
                        liquid: Some((500.0, 0.05)),
                    },
                );
            }
            Phone::RetroflexLiquid { resonance } => {
                let hold = system.ms(60.0);
                encode_sustained(
                    system,
                    previous,
                    Sustain {
                        target: resonance,
                        hold,
                        murmur: 0.0,
                        liquid: Some((resonance.frequencies[2], 0.03)),
                    },
                );
            }
            Phone::BilabialPlosive { voiced } => {
                encode_plosive(system, Place::Bilabial, voiced, next, true)
            }
            Phone::AlveolarPlosive { voiced } => {
                encode_plosive(system, Place::Alveolar, voiced, next, true)
            }
            Phone::VelarPlosive { voiced } => {
                encode_plosive(system, Place::Velar, voiced, next, true)
            }
            Phone::Fricative { channel, voiced } => {
                let hold = system.ms(if voiced { 80.0 } else { 100.0 });
                encode_fricative(system, channel, voiced, next, hold);
            }
            Phone::Affricate { voiced } => {
                encode_plosive(system, Place::Alveolar, voiced, next, false);
                let hold = system.ms(50.0);
                encode_fricative(system, Channel::SH, voiced, next, hold);
            }
            Phone::GlottalStop => {
                let catch = system.ms(15.0);
                let gap = system.ms(80.0);
                system.adjust_volume(0.0, catch);
                system.even_out();
                system.continue_for(gap);
            }
        }
    }
}

/// Hold multiplier for a sonorant followed by `next`.
fn hold_factor(next: Option<&Phone>) -> f64 {
    match next {
        None => FINAL_LENGTHENING,
        Some(phone) if !phone.is_voiced() && !phone.class().is_sonorant() => PRE_FORTIS_FACTOR,
        Some(_) => 1.0,
    }
}

/// Decays leftovers, pulls the formants to their starting point, glides to
/// the target and holds it.
fn encode_sustained(system: &mut VocalSystem, previous: Option<&Phone>, sustain: Sustain) {
    let release = system.ms(RELEASE_MS);
    system.turbulence_mut().adjust_volume(0.0, release);
    system.consonant_voice_mut().adjust_volume(sustain.murmur, release);
    match sustain.liquid {
        Some((frequency, volume)) => system.liquid_mut().adjust_all(frequency, volume, 0.0, release),
        None => system.liquid_mut().adjust_volume(0.0, release),
    }

    let transition = match previous {
        Some(prev) => {
            system.adjust_formants(prev.formant_pull(sustain.target), Duration::ZERO);
            system.scaled(prev.transition_time())
        }
        None => {
            system.adjust_formants(sustain.target.silent(), Duration::ZERO);
            system.ms(FADE_IN_MS)
        }
    };
    system.adjust_formants(sustain.target, transition);
    system.formants_mut().continue_for(sustain.hold);
    system.even_out();
}

/// Silence, optional voice bar, then a place-specific burst.
///
/// With `aspirate` set, voiceless stops are followed by breathy noise shaped
/// like the next phone's formants.
fn encode_plosive(
    system: &mut VocalSystem,
    place: Place,
    voiced: bool,
    next: Option<&Phone>,
    aspirate: bool,
) {
    let next_target = next.and_then(Phone::target);

    // Closure
    let silence = system.ms(20.0);
    let voice_onset = system.ms(10.0);
    let closure = system.ms(if voiced { 40.0 } else { 50.0 });
    system.adjust_volume(0.0, silence);
    if voiced {
        system
            .consonant_voice_mut()
            .adjust_volume(VOICE_BAR, voice_onset);
    }
    system.even_out();
    system.continue_for(closure);

    // Burst
    let burst_level = if voiced { 0.12 } else { 0.2 };
    let attack = system.ms(3.0);
    let hold = system.ms(7.0);
    if let Some(burst) = system.turbulence_mut().tone_mut(place.burst_channel()) {
        if place == Place::Velar {
            let frequency = next_target.map_or(VELAR_BURST_HZ, |t| t.frequencies[1]);
            burst.adjust_frequency(frequency, Duration::ZERO);
        }
        burst.adjust_volume(burst_level, attack);
        burst.continue_for(hold);
    }
    system.even_out();

    // Release
    let decay = system.ms(20.0);
    if let Some(burst) = system.turbulence_mut().tone_mut(place.burst_channel()) {
        burst.adjust_volume(0.0, decay);
    }
    if aspirate && !voiced {
        let rise = system.ms(10.0);
        let breath = system.ms(25.0);
        shape_aspiration(system, next_target);
        if let Some(aspiration) = system.turbulence_mut().set_mut("H") {
            aspiration.adjust_volume(ASPIRATION, rise);
            aspiration.continue_for(breath);
        }
    } else {
        system.consonant_voice_mut().continue_for(decay);
    }
    system.even_out();
}

/// Fades the voice out and sounds one turbulence channel.
fn encode_fricative(
    system: &mut VocalSystem,
    channel: Channel,
    voiced: bool,
    next: Option<&Phone>,
    hold: Duration,
) {
    let fade = system.ms(30.0);
    let level = channel.level() * if voiced { 0.6 } else { 1.0 };

    system.formants_mut().adjust_volume(0.0, fade);
    system.liquid_mut().adjust_volume(0.0, fade);
    system
        .consonant_voice_mut()
        .adjust_volume(if voiced { FRICATIVE_VOICING } else { 0.0 }, fade);
    system
        .turbulence_mut()
        .exclude(&[channel.name()])
        .adjust_volume(0.0, fade);

    if channel == Channel::H {
        shape_aspiration(system, next.and_then(Phone::target));
    }
    if let Some(own) = system.turbulence_mut().get_mut(channel.name()) {
        own.adjust_volume(level, fade);
    }
    system.even_out();
    system.continue_for(hold);
}

/// Retunes the aspiration formants to `target`, instantly.
fn shape_aspiration(system: &mut VocalSystem, target: Option<FormantState>) {
    let Some(target) = target else {
        return;
    };
    if let Some(aspiration) = system.turbulence_mut().set_mut("H") {
        for (i, name) in ["F1", "F2", "F3"].iter().enumerate() {
            if let Some(formant) = aspiration.tone_mut(name) {
                formant.adjust_frequency(target.frequencies[i], Duration::ZERO);
            }
        }
    }
}
