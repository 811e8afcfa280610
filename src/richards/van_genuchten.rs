//! The Van Genuchten–Mualem soil water retention and conductivity model.

/// Van Genuchten–Mualem parameters. The default is the soil of the sampled parameterization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VanGenuchten {
    pub theta_r: f64,
    pub theta_s: f64,
    /// 1/m
    pub alpha: f64,
    pub n: f64,
    /// m/s
    pub ks: f64,
}

impl Default for VanGenuchten {
    fn default() -> Self {
        VanGenuchten {
            theta_r: 0.07,
            theta_s: 0.35,
            alpha: 1.44,
            n: 1.2,
            ks: 1e-5,
        }
    }
}

impl VanGenuchten {
    fn m(&self) -> f64 {
        1.0 - 1.0 / self.n
    }

    /// Effective saturation.
    pub fn saturation(&self, psi: f64) -> f64 {
        if psi >= 0.0 {
            1.0
        } else {
            (1.0 + (self.alpha * psi.abs()).powf(self.n)).powf(-self.m())
        }
    }

    pub fn theta(&self, psi: f64) -> f64 {
        self.theta_r + (self.theta_s - self.theta_r) * self.saturation(psi)
    }

    /// dθ/dψ
    pub fn d_theta(&self, psi: f64) -> f64 {
        if psi >= 0.0 {
            return 0.0;
        }

        let m = self.m();
        let ap = self.alpha * psi.abs();
        (self.theta_s - self.theta_r)
            * self.alpha
            * self.n
            * m
            * ap.powf(self.n - 1.0)
            * (1.0 + ap.powf(self.n)).powf(-m - 1.0)
    }

    pub fn conductivity(&self, psi: f64) -> f64 {
        let se = self.saturation(psi);
        let m = self.m();
        self.ks * se.sqrt() * (1.0 - (1.0 - se.powf(1.0 / m)).powf(m)).powi(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn van_genuchten_limits() {
        let vg = VanGenuchten::default();

        assert_eq!(vg.theta(0.0), vg.theta_s);
        assert_eq!(vg.d_theta(0.0), 0.0);
        assert!((vg.conductivity(0.0) - vg.ks).abs() < 1e-12);

        let dry = vg.theta(-1e4);
        assert!(dry > vg.theta_r && dry < vg.theta_r + 0.05);

        // monotone
        assert!(vg.theta(-1.0) < vg.theta(-0.5));
        assert!(vg.conductivity(-1.0) < vg.conductivity(-0.5));
    }

    #[test]
    fn d_theta_is_derivative() {
        let vg = VanGenuchten::default();
        let (p, h) = (-2.0, 1e-6);
        let fd = (vg.theta(p + h) - vg.theta(p - h)) / (2.0 * h);

        assert!((fd - vg.d_theta(p)).abs() < 1e-6);
    }
}
