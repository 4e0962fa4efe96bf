#[derive(Clone, Copy, Debug)]
pub struct LinearScale {
    domain: (f32, f32),
    range: (f32, f32),
}

impl LinearScale {
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f32, f32) {
        self.domain
    }

    pub fn range(&self) -> (f32, f32) {
        self.range
    }

    pub fn nice(mut self, count: usize) -> Self {
        let (mut start, mut stop) = self.domain;
        if !(stop - start).is_finite() || stop <= start {
            return self;
        }

        for _ in 0..2 {
            let step = tick_step(start, stop, count);
            if step <= 0.0 {
                break;
            }
            start = (start / step).floor() * step;
            stop = (stop / step).ceil() * step;
        }

        self.domain = (start, stop);
        self
    }

    pub fn position(&self, value: f32) -> f32 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span.abs() <= f32::EPSILON {
            return (r0 + r1) / 2.0;
        }
        r0 + ((value - d0) / span) * (r1 - r0)
    }

    pub fn ticks(&self, count: usize) -> Vec<f32> {
        let (d0, d1) = self.domain;
        if d1 <= d0 {
            return vec![d0];
        }

        let step = tick_step(d0, d1, count);
        if step <= 0.0 {
            return vec![d0];
        }

        let first = (d0 / step).ceil();
        let last = (d1 / step).floor();
        let mut ticks = Vec::new();
        let mut index = first;
        while index <= last {
            ticks.push(index * step);
            index += 1.0;
        }
        ticks
    }
}

fn tick_step(start: f32, stop: f32, count: usize) -> f32 {
    let count = count.max(1) as f32;
    let raw = (stop - start) / count;
    if raw <= 0.0 || !raw.is_finite() {
        return 0.0;
    }

    let power = raw.log10().floor();
    let base = 10.0_f32.powf(power);
    let error = raw / base;

    let factor = if error >= 50.0_f32.sqrt() {
        10.0
    } else if error >= 10.0_f32.sqrt() {
        5.0
    } else if error >= 2.0_f32.sqrt() {
        2.0
    } else {
        1.0
    };

    factor * base
}
