//! Fixed-coupon bond with live price, duration and convexity.
//!
//! ## Formulas
//!
//! With coupon payment Cp = C·F/M and n = (T − Now)·M periods:
//!
//! - P = Σᵢ Cp/(1+Y)ⁱ + F/(1+Y)ⁿ
//! - D = [Σᵢ Cp·(i/M)/(1+Y)ⁱ + F·(T − Now)/(1+Y)ⁿ] / P
//! - Dm = D/(1+Y)
//! - Cov = [Σᵢ Cp·i(i+1)/(1+Y)ⁱ + F·n(n+1)/(1+Y)ⁿ] / (P·(1+Y)²)
//!
//! Sums run over whole periods i = 1..⌊n⌋ and are skipped for discount bonds.

use std::fmt;

use quant_core::entity::{NamedEntity, PropertyBag};
use quant_core::reactive::{Input, Reactive};

use crate::error::Result;

/// Bond inputs. Every field defaults as documented when left as
/// [`Input::Default`].
#[derive(Clone, Debug, Default)]
pub struct BondTerms {
    /// Face value, default 100.
    pub face: Input,
    /// Yield to maturity per period, default 0.
    pub ytm: Input,
    /// Maturity in years, default 1.
    pub maturity: Input,
    /// Valuation time in years, default 0.
    pub now: Input,
    /// Annual coupon rate, default 0 (discount bond).
    pub coupon: Input,
    /// Coupon payments per year, default 1.
    pub pay_times: Input,
}

#[derive(Clone, Debug)]
struct Inputs {
    face: Reactive,
    ytm: Reactive,
    maturity: Reactive,
    now: Reactive,
    coupon_payment: Reactive,
    pay_times: Reactive,
}

impl Inputs {
    fn periods(&self) -> f64 {
        (self.maturity.get() - self.now.get()) * self.pay_times.get()
    }

    /// Σ over whole coupon periods of `term(i, Cp/(1+Y)^i)`.
    fn coupon_sum(&self, term: impl Fn(f64, f64) -> f64) -> f64 {
        let cp = self.coupon_payment.get();
        if cp <= 0.0 {
            return 0.0;
        }
        let growth = 1.0 + self.ytm.get();
        let n = self.periods();
        let mut acc = 0.0;
        let mut i = 1.0;
        while i <= n {
            acc += term(i, cp / growth.powf(i));
            i += 1.0;
        }
        acc
    }

    fn discounted_face(&self) -> f64 {
        self.face.get() / (1.0 + self.ytm.get()).powf(self.periods())
    }
}

/// A bond whose analytics are reactive outputs.
///
/// # Examples
/// ```
/// use quant_core::entity::NamedEntity;
/// use quant_core::reactive::Input;
/// use quant_models::instruments::{Bond, BondTerms};
///
/// let terms = BondTerms {
///     ytm: Input::Value(0.05),
///     maturity: Input::Value(3.0),
///     ..Default::default()
/// };
/// let zero = Bond::new("z", terms).unwrap();
/// assert!((zero.output("P").unwrap() - 86.3838).abs() < 1e-4);
/// assert!((zero.output("D").unwrap() - 3.0).abs() < 1e-12);
/// ```
#[derive(Debug)]
pub struct Bond {
    bag: PropertyBag,
    inputs: Inputs,
    coupon: Reactive,
    price: Reactive,
    duration: Reactive,
    modified_duration: Reactive,
    convexity: Reactive,
}

impl Bond {
    /// Creates a bond from its terms.
    pub fn new(name: &str, terms: BondTerms) -> Result<Self> {
        let face = terms.face.into_reactive("face", Some(100.0))?;
        let ytm = terms.ytm.into_reactive("ytm", Some(0.0))?;
        let maturity = terms.maturity.into_reactive("maturity", Some(1.0))?;
        let now = terms.now.into_reactive("now", Some(0.0))?;
        let coupon = terms.coupon.into_reactive("coupon", Some(0.0))?;
        let pay_times = terms.pay_times.into_reactive("pay_times", Some(1.0))?;

        let coupon_payment = {
            let (c, f, m) = (coupon.clone(), face.clone(), pay_times.clone());
            Reactive::formula(move || c.get() * f.get() / m.get())
        };

        let inputs = Inputs {
            face,
            ytm,
            maturity,
            now,
            coupon_payment,
            pay_times,
        };

        let price = {
            let s = inputs.clone();
            Reactive::formula(move || s.coupon_sum(|_, pv| pv) + s.discounted_face())
        };

        let duration = {
            let s = inputs.clone();
            let p = price.clone();
            Reactive::formula(move || {
                let m = s.pay_times.get();
                let weighted = s.coupon_sum(|i, pv| pv * i / m)
                    + s.discounted_face() * (s.maturity.get() - s.now.get());
                weighted / p.get()
            })
        };

        let modified_duration = {
            let (d, y) = (duration.clone(), inputs.ytm.clone());
            Reactive::formula(move || d.get() / (1.0 + y.get()))
        };

        let convexity = {
            let s = inputs.clone();
            let p = price.clone();
            Reactive::formula(move || {
                let n = s.periods();
                let growth = 1.0 + s.ytm.get();
                let cov = s.coupon_sum(|i, pv| pv * i * (i + 1.0))
                    + s.discounted_face() * n * (n + 1.0);
                cov / (p.get() * growth * growth)
            })
        };

        let mut bag = PropertyBag::new(name);
        bag.register("F", None, inputs.face.clone())?;
        bag.register("Y", None, inputs.ytm.clone())?;
        bag.register("T", None, inputs.maturity.clone())?;
        bag.register("Now", None, inputs.now.clone())?;
        bag.register("C", None, coupon.clone())?;
        bag.register("M", None, inputs.pay_times.clone())?;
        bag.register("Cp", None, inputs.coupon_payment.clone())?;
        bag.register("P", None, price.clone())?;
        bag.register("D", None, duration.clone())?;
        bag.register("Dm", None, modified_duration.clone())?;
        bag.register("Cov", None, convexity.clone())?;

        Ok(Self {
            bag,
            inputs,
            coupon,
            price,
            duration,
            modified_duration,
            convexity,
        })
    }

    /// Yield cell.
    pub fn ytm(&self) -> &Reactive {
        &self.inputs.ytm
    }

    /// Coupon rate cell.
    pub fn coupon(&self) -> &Reactive {
        &self.coupon
    }

    /// Price at `Now`.
    pub fn price(&self) -> &Reactive {
        &self.price
    }

    /// Macaulay duration.
    pub fn duration(&self) -> &Reactive {
        &self.duration
    }

    /// Modified duration.
    pub fn modified_duration(&self) -> &Reactive {
        &self.modified_duration
    }

    /// Convexity.
    pub fn convexity(&self) -> &Reactive {
        &self.convexity
    }
}

impl NamedEntity for Bond {
    fn properties(&self) -> &PropertyBag {
        &self.bag
    }
}

impl fmt::Display for Bond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
