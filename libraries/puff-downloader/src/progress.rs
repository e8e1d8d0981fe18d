//! Progress blending across download phases.
//!
//! A video job downloads two files: the video maps onto 0–50 and the audio
//! rendition onto 50–100. An audio job maps its single file onto 0–100.

/// Turns per-file fractions into one job-wide percentage
#[derive(Debug, Clone)]
pub struct ProgressBlender {
    two_phase: bool,
    current: f32,
}

impl ProgressBlender {
    pub fn new(two_phase: bool) -> Self {
        Self {
            two_phase,
            current: 0.0,
        }
    }

    /// Percentage for a fraction of the primary file
    pub fn primary(&mut self, fraction: f32) -> f32 {
        let span = if self.two_phase { 50.0 } else { 100.0 };
        self.advance(clamp_fraction(fraction) * span)
    }

    /// Percentage for a fraction of the secondary file
    pub fn secondary(&mut self, fraction: f32) -> f32 {
        self.advance(50.0 + clamp_fraction(fraction) * 50.0)
    }

    /// Job finished
    pub fn finish(&mut self) -> f32 {
        self.current = 100.0;
        self.current
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    fn advance(&mut self, value: f32) -> f32 {
        if value > self.current {
            self.current = value.min(100.0);
        }
        self.current
    }
}

fn clamp_fraction(fraction: f32) -> f32 {
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_job_maps_to_full_range() {
        let mut blender = ProgressBlender::new(false);
        assert_eq!(blender.primary(0.25), 25.0);
        assert_eq!(blender.primary(1.0), 100.0);
    }

    #[test]
    fn video_job_splits_range() {
        let mut blender = ProgressBlender::new(true);
        assert_eq!(blender.primary(0.5), 25.0);
        assert_eq!(blender.primary(1.0), 50.0);
        assert_eq!(blender.secondary(0.0), 50.0);
        assert_eq!(blender.secondary(0.5), 75.0);
        assert_eq!(blender.secondary(1.0), 100.0);
    }

    #[test]
    fn never_goes_backwards() {
        let mut blender = ProgressBlender::new(true);
        blender.primary(0.8);
        assert_eq!(blender.primary(0.2), 40.0);
        assert_eq!(blender.primary(f32::NAN), 40.0);
        assert_eq!(blender.primary(7.0), 50.0);
    }

    #[test]
    fn finish_is_exactly_one_hundred() {
        let mut blender = ProgressBlender::new(true);
        blender.primary(0.3);
        assert_eq!(blender.finish(), 100.0);
    }
}
