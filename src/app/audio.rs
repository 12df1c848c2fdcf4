use std::f32::consts::TAU;

use macroquad::audio::{PlaySoundParams, Sound, load_sound_from_bytes, play_sound};
use snake_vibes::FrameOutcome;
use tracing::warn;

const SAMPLE_RATE: u32 = 44_100;
const PEAK: f32 = 0.42;

/// A fixed sine beep and the volume it is played back at.
#[derive(Clone, Copy, Debug)]
struct Tone {
    label: &'static str,
    hz: f32,
    seconds: f32,
    volume: f32,
}

const EAT: Tone = Tone { label: "eat", hz: 880.0, seconds: 0.08, volume: 0.35 };
const DIE: Tone = Tone { label: "die", hz: 110.0, seconds: 0.25, volume: 0.6 };

impl Tone {
    fn samples(&self) -> impl Iterator<Item = i16> + '_ {
        let count = (self.seconds * SAMPLE_RATE as f32) as u32;
        let step = TAU * self.hz / SAMPLE_RATE as f32;
        (0..count).map(move |n| ((n as f32 * step).sin() * PEAK * f32::from(i16::MAX)) as i16)
    }

    /// Mono 16-bit PCM wrapped in a RIFF container.
    fn to_wav(self) -> Vec<u8> {
        let pcm: Vec<u8> = self.samples().flat_map(i16::to_le_bytes).collect();

        let mut fmt = Vec::with_capacity(16);
        fmt.extend(1u16.to_le_bytes());
        fmt.extend(1u16.to_le_bytes());
        fmt.extend(SAMPLE_RATE.to_le_bytes());
        fmt.extend((SAMPLE_RATE * 2).to_le_bytes());
        fmt.extend(2u16.to_le_bytes());
        fmt.extend(16u16.to_le_bytes());

        let mut body = b"WAVE".to_vec();
        push_chunk(&mut body, b"fmt ", &fmt);
        push_chunk(&mut body, b"data", &pcm);

        let mut wav = Vec::with_capacity(body.len() + 8);
        push_chunk(&mut wav, b"RIFF", &body);
        wav
    }

    async fn load(self) -> Option<Sound> {
        load_sound_from_bytes(&self.to_wav())
            .await
            .map_err(|err| warn!(cue = self.label, error = ?err, "sound cue disabled"))
            .ok()
    }

    fn play(&self, sound: &Option<Sound>) {
        if let Some(sound) = sound {
            play_sound(sound, PlaySoundParams { looped: false, volume: self.volume });
        }
    }
}

fn push_chunk(out: &mut Vec<u8>, id: &[u8; 4], payload: &[u8]) {
    out.extend_from_slice(id);
    out.extend((payload.len() as u32).to_le_bytes());
    out.extend_from_slice(payload);
}

/// Short beeps for eating and dying.
pub struct Cues {
    eat: Option<Sound>,
    die: Option<Sound>,
}

impl Cues {
    pub async fn load() -> Cues {
        Cues { eat: EAT.load().await, die: DIE.load().await }
    }

    pub fn play(&self, outcome: &FrameOutcome) {
        if outcome.food_eaten > 0 {
            EAT.play(&self.eat);
        }
        if outcome.game_over.is_some() {
            DIE.play(&self.die);
        }
    }
}
