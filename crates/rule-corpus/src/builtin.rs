//! Built-in pattern catalog.
//!
//! Patterns are grouped by category. Base severities encode how bad the
//! matched language tends to be; confidences encode how unambiguous the
//! lexical evidence is on its own, and deliberately sit below deep-analysis
//! confidence levels.

use risk_types::RiskCategory;

use crate::pattern::{MatchMode, RiskPattern, SeverityBoost};

fn lit(
    id: &str,
    category: RiskCategory,
    phrase: &str,
    base_severity: f64,
    confidence: f64,
    description: &str,
    recommendation: &str,
) -> RiskPattern {
    RiskPattern {
        id: id.into(),
        category,
        mode: MatchMode::Literal {
            phrase: phrase.into(),
        },
        base_severity,
        confidence,
        description: description.into(),
        recommendation: recommendation.into(),
        boost: None,
    }
}

fn rx(
    id: &str,
    category: RiskCategory,
    expression: &str,
    base_severity: f64,
    confidence: f64,
    description: &str,
    recommendation: &str,
) -> RiskPattern {
    RiskPattern {
        id: id.into(),
        category,
        mode: MatchMode::Regex {
            expression: expression.into(),
        },
        base_severity,
        confidence,
        description: description.into(),
        recommendation: recommendation.into(),
        boost: None,
    }
}

fn prox(
    id: &str,
    category: RiskCategory,
    terms: &[&str],
    window: usize,
    base_severity: f64,
    confidence: f64,
    description: &str,
    recommendation: &str,
) -> RiskPattern {
    RiskPattern {
        id: id.into(),
        category,
        mode: MatchMode::Proximity {
            terms: terms.iter().map(|t| t.to_string()).collect(),
            window,
        },
        base_severity,
        confidence,
        description: description.into(),
        recommendation: recommendation.into(),
        boost: None,
    }
}

fn boosted(mut pattern: RiskPattern, terms: &[&str], amount: f64) -> RiskPattern {
    pattern.boost = Some(SeverityBoost {
        terms: terms.iter().map(|t| t.to_string()).collect(),
        amount,
    });
    pattern
}

/// The full built-in catalog.
pub fn patterns() -> Vec<RiskPattern> {
    let mut all = Vec::new();
    all.extend(financial());
    all.extend(legal_liability());
    all.extend(termination());
    all.extend(intellectual_property());
    all.extend(confidentiality());
    all.extend(dispute_resolution());
    all.extend(compliance());
    all.extend(operational());
    all
}

fn financial() -> Vec<RiskPattern> {
    use RiskCategory::Financial as C;
    vec![
        lit(
            "fin-unlimited-liability", C, "unlimited liability", 0.9, 0.8,
            "No cap on financial exposure",
            "Negotiate an aggregate liability cap tied to fees paid",
        ),
        lit(
            "fin-without-limitation", C, "without limitation", 0.7, 0.55,
            "Potentially unlimited scope of obligations",
            "Ask for an explicit ceiling on the obligation",
        ),
        rx(
            "fin-no-cap", C, r"\bno\s+(?:cap|limit)\b|\buncapped\b", 0.75, 0.65,
            "Missing cap or limit on amounts owed",
            "Insert a monetary cap on the exposure",
        ),
        lit(
            "fin-non-refundable", C, "non-refundable", 0.6, 0.7,
            "Payments cannot be recovered",
            "Seek pro-rata refunds for unused periods",
        ),
        lit(
            "fin-no-refund", C, "no refund", 0.7, 0.7,
            "Refunds prohibited outright",
            "Negotiate refund rights for non-performance",
        ),
        lit(
            "fin-forfeiture", C, "forfeiture", 0.6, 0.6,
            "Deposits or payments may be forfeited",
            "Limit forfeiture to documented actual damages",
        ),
        prox(
            "fin-unilateral-price", C, &["sole discretion", "fees"], 20, 0.75, 0.6,
            "Unilateral fee changes at counterparty's discretion",
            "Require notice and a consent or exit right for fee changes",
        ),
        lit(
            "fin-automatic-increase", C, "automatically increase", 0.6, 0.65,
            "Automatic cost escalation",
            "Cap the escalation rate and require advance notice",
        ),
        rx(
            "fin-percent-increase", C, r"\bincrease\s+(?:by|of)\s+\d+\s*%", 0.45, 0.6,
            "Explicit percentage price increase",
            "Verify the increase rate against market norms",
        ),
        lit(
            "fin-penalties-compound", C, "penalties compound", 0.75, 0.7,
            "Compounding financial penalties",
            "Replace compounding penalties with simple, capped ones",
        ),
        lit(
            "fin-liquidated-damages", C, "liquidated damages", 0.45, 0.6,
            "Preset damage amounts",
            "Check the preset amount is a genuine pre-estimate of loss",
        ),
        lit(
            "fin-acceleration", C, "acceleration clause", 0.6, 0.65,
            "All payments become due on default",
            "Add notice and cure requirements before acceleration",
        ),
        rx(
            "fin-long-payment-terms", C, r"\bnet[-\s]?(?:60|90)\b", 0.4, 0.6,
            "Extended payment terms",
            "Negotiate toward net-30 payment terms",
        ),
        lit(
            "fin-exchange-risk", C, "bears the exchange risk", 0.6, 0.65,
            "One party bears all currency risk",
            "Share currency fluctuation risk or fix the rate",
        ),
        lit(
            "fin-all-taxes", C, "responsible for all taxes", 0.45, 0.6,
            "Full tax liability on one party",
            "Limit tax responsibility to taxes on own income",
        ),
        lit(
            "fin-gross-up", C, "gross up", 0.45, 0.5,
            "Tax gross-up obligation",
            "Quantify the gross-up exposure before agreeing",
        ),
    ]
}

fn legal_liability() -> Vec<RiskPattern> {
    use RiskCategory::LegalLiability as C;
    vec![
        boosted(
            lit(
                "lia-indemnify", C, "shall indemnify", 0.6, 0.65,
                "Indemnification obligation",
                "Make indemnity mutual and cap it",
            ),
            &["unlimited", "any and all", "without limitation"],
            0.2,
        ),
        lit(
            "lia-indemnify-hold-harmless", C, "indemnify and hold harmless", 0.75, 0.7,
            "Strong indemnity plus hold-harmless obligation",
            "Narrow the indemnity to third-party claims caused by breach",
        ),
        lit(
            "lia-defend-indemnify", C, "defend, indemnify", 0.75, 0.7,
            "Duty to defend on top of indemnity",
            "Strike the duty to defend or cap defense costs",
        ),
        lit(
            "lia-hold-harmless", C, "hold harmless", 0.6, 0.6,
            "Hold-harmless provision",
            "Confirm the scope and add a negligence carve-out",
        ),
        lit(
            "lia-waive-all-claims", C, "waive all claims", 0.9, 0.75,
            "Waiver of all claims",
            "Reject blanket claim waivers; preserve statutory rights",
        ),
        lit(
            "lia-release-all-liability", C, "releases from all liability", 0.9, 0.75,
            "Complete liability release",
            "Limit the release to specific, identified claims",
        ),
        lit(
            "lia-forever-release", C, "forever release", 0.9, 0.7,
            "Permanent release of claims",
            "Time-limit the release and carve out unknown claims",
        ),
        boosted(
            rx(
                "lia-one-sided-indemnity", C,
                r"\b(?:you|customer|licensee|user)\s+(?:shall|must|will|agrees?\s+to)\s+(?:indemnify|hold\s+harmless)",
                0.8, 0.7,
                "One-sided indemnification running against the reader",
                "Demand a reciprocal indemnity from the counterparty",
            ),
            &["any and all"],
            0.1,
        ),
        rx(
            "lia-any-and-all-claims", C,
            r"\b(?:any\s+and\s+all|all\s+and\s+any)\s+(?:claims?|damages?|losses?|liabilit(?:y|ies))",
            0.7, 0.6,
            "Broad any-and-all damages language",
            "Enumerate the covered claim types instead",
        ),
        lit(
            "lia-fullest-extent", C, "to the fullest extent permitted by law", 0.6, 0.6,
            "Obligation stretched to the legal maximum",
            "Replace with a specific, negotiated scope",
        ),
        lit(
            "lia-excludes-all-liability", C, "disclaims all liability", 0.75, 0.7,
            "Complete liability disclaimer",
            "Preserve liability for gross negligence and willful acts",
        ),
        lit(
            "lia-with-all-faults", C, "with all faults", 0.6, 0.65,
            "As-is, no-warranty language",
            "Obtain minimum fitness and conformance warranties",
        ),
        lit(
            "lia-joint-several", C, "joint and several", 0.75, 0.7,
            "Joint and several liability",
            "Limit each party's liability to its own share",
        ),
        lit(
            "lia-personal-guarantee", C, "personal guarantee", 0.75, 0.75,
            "Personal guarantee required",
            "Remove the personal guarantee or cap the guaranteed amount",
        ),
        lit(
            "lia-even-if-advised", C, "even if advised of", 0.6, 0.6,
            "Liability persists even with prior warning",
            "Strike the advised-of-possibility language",
        ),
        lit(
            "lia-regardless-negligence", C, "regardless of negligence", 0.75, 0.7,
            "Liability without regard to fault",
            "Restore a negligence standard for liability",
        ),
    ]
}

fn termination() -> Vec<RiskPattern> {
    use RiskCategory::Termination as C;
    vec![
        rx(
            "term-auto-renewal", C,
            r"\bauto(?:matically)?[-\s]?renew(?:s|al|ed)?\b|\brenew\s+automatically\b",
            0.6, 0.7,
            "Contract renews automatically",
            "Calendar the non-renewal notice deadline and shorten renewals",
        ),
        lit(
            "term-evergreen", C, "evergreen", 0.6, 0.6,
            "Evergreen contract term",
            "Convert to fixed terms with explicit renewal",
        ),
        rx(
            "term-cannot-terminate", C,
            r"\b(?:may|can|shall)\s+not\s+terminate\b|\bno\s+right\s+to\s+terminate\b",
            0.85, 0.75,
            "Termination right denied",
            "Secure a termination-for-convenience right with notice",
        ),
        lit(
            "term-irrevocable", C, "irrevocable", 0.85, 0.7,
            "Commitment cannot be revoked",
            "Add exit conditions; avoid irrevocable commitments",
        ),
        rx(
            "term-non-cancelable", C, r"\bnon[-\s]?cancell?able\b", 0.75, 0.7,
            "Contract cannot be cancelled",
            "Negotiate cancellation rights with a defined fee",
        ),
        lit(
            "term-termination-fee", C, "termination fee", 0.6, 0.65,
            "Fee charged for terminating",
            "Cap the termination fee and exclude termination for cause",
        ),
        lit(
            "term-pay-remainder", C, "pay for the remainder", 0.75, 0.7,
            "Full remaining-term payment on exit",
            "Replace with a wind-down fee for actual costs",
        ),
        rx(
            "term-long-notice", C, r"\b(?:90|120|180)\s+days'?\s+(?:prior\s+)?(?:written\s+)?notice\b",
            0.5, 0.6,
            "Long termination notice period",
            "Shorten the notice period to 30-60 days",
        ),
        lit(
            "term-in-perpetuity", C, "in perpetuity", 0.9, 0.75,
            "Obligation lasts forever",
            "Sunset the obligation after a defined period",
        ),
        lit(
            "term-perpetual", C, "perpetual", 0.75, 0.55,
            "Perpetual term or obligation",
            "Confirm which obligations truly need to survive",
        ),
        lit(
            "term-survives-indefinitely", C, "survives termination indefinitely", 0.9, 0.75,
            "Indefinite survival after termination",
            "Time-limit surviving obligations",
        ),
        prox(
            "term-for-cause-only", C, &["terminate", "material breach only"], 25, 0.6, 0.6,
            "Termination restricted to material breach",
            "Add termination for convenience or for repeated minor breach",
        ),
        rx(
            "term-immediate-no-cure", C,
            r"\bimmediate\s+termination\s+(?:without|with\s+no)\s+(?:cure|notice)\b",
            0.75, 0.75,
            "Immediate termination with no cure period",
            "Insert a written-notice-and-cure requirement",
        ),
        lit(
            "term-no-cure-period", C, "no cure period", 0.75, 0.7,
            "No opportunity to cure breaches",
            "Add a 15-30 day cure period for curable breaches",
        ),
        prox(
            "term-discretionary", C, &["sole discretion", "terminate"], 30, 0.7, 0.65,
            "Termination at the counterparty's sole discretion",
            "Tie termination rights to objective conditions",
        ),
    ]
}

fn intellectual_property() -> Vec<RiskPattern> {
    use RiskCategory::IntellectualProperty as C;
    vec![
        lit(
            "ip-assigns-all", C, "assigns all right, title, and interest", 0.9, 0.8,
            "Complete IP transfer",
            "Retain ownership; grant a license instead of an assignment",
        ),
        rx(
            "ip-assignment", C, r"\b(?:hereby|irrevocably)\s+assigns\b", 0.7, 0.65,
            "IP assignment language",
            "Confirm exactly which deliverables are assigned",
        ),
        rx(
            "ip-work-for-hire", C, r"\bwork(?:s)?\s+(?:made\s+)?for\s+hire\b", 0.75, 0.7,
            "Work-for-hire classification",
            "Exclude pre-existing and general-purpose work from the scope",
        ),
        boosted(
            lit(
                "ip-exclusive-license", C, "exclusive license", 0.6, 0.65,
                "Exclusive license grant",
                "Prefer a non-exclusive grant or field-limit the exclusivity",
            ),
            &["perpetual", "irrevocable", "worldwide"],
            0.25,
        ),
        lit(
            "ip-exclusive-perpetual-worldwide", C, "exclusive, perpetual, worldwide", 0.9, 0.8,
            "Broadest possible license grant",
            "Limit at least one of scope, duration, or territory",
        ),
        lit(
            "ip-sublicensable", C, "sublicensable", 0.45, 0.6,
            "Rights can be sublicensed onward",
            "Require consent for sublicensing",
        ),
        lit(
            "ip-future-developments", C, "future developments", 0.75, 0.6,
            "Future IP swept into the grant",
            "Limit the grant to work created under this agreement",
        ),
        lit(
            "ip-all-derivatives", C, "all derivative works", 0.75, 0.65,
            "All derivatives included in the grant",
            "Carve out independently created derivatives",
        ),
        rx(
            "ip-moral-rights", C, r"\bwaives?\s+(?:all\s+|any\s+)?moral\s+rights\b", 0.75, 0.75,
            "Moral rights waiver",
            "Check enforceability in your jurisdiction before waiving",
        ),
        lit(
            "ip-deliver-source", C, "deliver source code", 0.6, 0.65,
            "Source code delivery required",
            "Offer escrow release conditions instead of delivery",
        ),
        lit(
            "ip-background-retained", C, "retains ownership of background", 0.15, 0.6,
            "Background IP ownership retained",
            "Standard protective term; confirm the license back is adequate",
        ),
    ]
}

fn confidentiality() -> Vec<RiskPattern> {
    use RiskCategory::Confidentiality as C;
    vec![
        rx(
            "conf-perpetual", C,
            r"\b(?:perpetual|indefinite)\s+confidentiality\b|\bconfidential\s+in\s+perpetuity\b",
            0.9, 0.75,
            "Confidentiality obligation never expires",
            "Limit confidentiality to 3-5 years except trade secrets",
        ),
        rx(
            "conf-broad-scope", C, r"\b(?:any|all)\s+(?:and\s+all\s+)?information\b", 0.6, 0.5,
            "Very broad confidentiality scope",
            "Limit scope to marked or reasonably-confidential information",
        ),
        lit(
            "conf-unmarked", C, "whether or not marked confidential", 0.6, 0.65,
            "Unmarked information treated as confidential",
            "Require marking or written confirmation of confidentiality",
        ),
        prox(
            "conf-discretionary-disclosure", C, &["sole discretion", "disclose"], 25, 0.75, 0.65,
            "Counterparty may disclose at its discretion",
            "Require consent before any third-party disclosure",
        ),
        lit(
            "conf-no-return", C, "no obligation to return", 0.75, 0.7,
            "No duty to return confidential materials",
            "Add return-or-destroy obligations on termination",
        ),
        rx(
            "conf-waive-data-protection", C, r"\bwaives?\s+data\s+protection(?:\s+rights)?\b",
            0.9, 0.75,
            "Data protection rights waived",
            "Never waive statutory data protection rights",
        ),
        lit(
            "conf-no-data-security", C, "not responsible for data security", 0.75, 0.7,
            "No responsibility for data security",
            "Require reasonable security measures and breach notice",
        ),
        lit(
            "conf-one-way", C, "receiving party shall", 0.45, 0.45,
            "Possibly one-sided confidentiality obligations",
            "Make confidentiality obligations mutual",
        ),
        lit(
            "conf-mutual", C, "mutual confidentiality", 0.15, 0.6,
            "Mutual obligations",
            "Standard balanced term",
        ),
        lit(
            "conf-share-affiliates", C, "share with affiliates without notice", 0.75, 0.7,
            "Unnotified sharing with affiliates",
            "Require notice and flow-down of confidentiality duties",
        ),
    ]
}

fn dispute_resolution() -> Vec<RiskPattern> {
    use RiskCategory::DisputeResolution as C;
    vec![
        rx(
            "dis-binding-arbitration", C, r"\b(?:binding|mandatory)\s+arbitration\b", 0.6, 0.7,
            "Mandatory arbitration",
            "Evaluate arbitration rules, seat, and cost allocation",
        ),
        prox(
            "dis-distant-venue", C,
            &["arbitration", "Singapore"], 25, 0.65, 0.6,
            "Arbitration seated in a distant venue",
            "Negotiate a neutral or local arbitration seat",
        ),
        prox(
            "dis-london-venue", C,
            &["arbitration", "London"], 25, 0.65, 0.6,
            "Arbitration seated in a distant venue",
            "Negotiate a neutral or local arbitration seat",
        ),
        lit(
            "dis-no-appeal", C, "no appeal", 0.75, 0.65,
            "Appeal rights excluded",
            "Preserve appeal rights for legal error where possible",
        ),
        lit(
            "dis-exclusive-jurisdiction", C, "exclusive jurisdiction", 0.5, 0.65,
            "Single forum for all disputes",
            "Check the chosen forum is practical for you",
        ),
        lit(
            "dis-foreign-jurisdiction", C, "foreign jurisdiction", 0.75, 0.65,
            "Disputes heard in a foreign court",
            "Negotiate home-forum or neutral jurisdiction",
        ),
        rx(
            "dis-jury-waiver", C, r"\bwaives?\s+(?:the\s+)?right\s+to\s+(?:a\s+)?(?:jury\s+trial|trial\s+by\s+jury)\b|\bwaive\s+jury\s+trial\b",
            0.75, 0.75,
            "Jury trial waiver",
            "Understand bench-trial implications before agreeing",
        ),
        rx(
            "dis-class-waiver", C, r"\b(?:waives?\s+(?:right\s+to\s+)?class\s+action|class\s+action\s+waiver|no\s+class\s+proceedings)\b",
            0.75, 0.75,
            "Class action waiver",
            "Assess whether individual arbitration is viable for likely claims",
        ),
        lit(
            "dis-loser-pays", C, "loser pays", 0.75, 0.7,
            "Losing party pays all costs",
            "Prefer each-party-bears-own-costs or prevailing-party caps",
        ),
        lit(
            "dis-prevailing-fees", C, "prevailing party entitled to fees", 0.6, 0.65,
            "Fee shifting to the prevailing party",
            "Cap recoverable fees at a reasonable amount",
        ),
        rx(
            "dis-short-limitation", C, r"\b(?:one\s+year|6\s+month)s?\s+limitation\b", 0.65, 0.65,
            "Shortened claim limitation period",
            "Restore the statutory limitation period",
        ),
        lit(
            "dis-mediation", C, "mediation", 0.15, 0.55,
            "Mediation step before formal dispute",
            "Standard protective term",
        ),
    ]
}

fn compliance() -> Vec<RiskPattern> {
    use RiskCategory::Compliance as C;
    vec![
        lit(
            "comp-sole-responsibility", C, "sole responsibility for compliance", 0.75, 0.7,
            "Entire compliance burden on one party",
            "Allocate compliance duties to the party best placed for each",
        ),
        boosted(
            lit(
                "comp-strict-liability", C, "strict liability", 0.75, 0.7,
                "Liability without fault",
                "Replace strict liability with a negligence standard",
            ),
            &["absolute"],
            0.15,
        ),
        rx(
            "comp-regardless-fault", C, r"\bregardless\s+of\s+fault\b|\bwithout\s+regard\s+to\s+negligence\b",
            0.75, 0.7,
            "Liability attaches without fault",
            "Restore a fault-based standard",
        ),
        lit(
            "comp-unlimited-audit", C, "unlimited audit", 0.75, 0.7,
            "Unrestricted audit rights",
            "Limit audits to once a year on reasonable notice",
        ),
        lit(
            "comp-audit-any-time", C, "audit at any time", 0.6, 0.65,
            "Audits without notice restrictions",
            "Require reasonable advance notice for audits",
        ),
        prox(
            "comp-permits-own-expense", C, &["permits", "at own expense"], 20, 0.55, 0.6,
            "Permit costs pushed onto one party",
            "Split permit and license costs by benefit",
        ),
        lit(
            "comp-government-approval", C, "government approval", 0.6, 0.6,
            "Government approval required",
            "Clarify which party obtains approvals and what happens on refusal",
        ),
        rx(
            "comp-export-control", C, r"\b(?:ITAR|OFAC|export\s+control(?:s)?|sanctions)\b", 0.55, 0.6,
            "Export control or sanctions obligations",
            "Confirm your compliance program covers the named regimes",
        ),
        rx(
            "comp-privacy-regimes", C, r"\b(?:HIPAA|GDPR|CCPA|PCI\s*DSS)\b", 0.45, 0.6,
            "Sector privacy/compliance regime invoked",
            "Verify certification status before committing",
        ),
        lit(
            "comp-regulatory-violations", C, "regulatory violations", 0.6, 0.6,
            "Responsibility for regulatory violations",
            "Limit responsibility to violations caused by own conduct",
        ),
    ]
}

fn operational() -> Vec<RiskPattern> {
    use RiskCategory::Operational as C;
    vec![
        lit(
            "ops-time-essence", C, "time is of the essence", 0.75, 0.75,
            "Any delay is a material breach",
            "Strike the clause or limit it to key milestones",
        ),
        boosted(
            lit(
                "ops-sole-discretion", C, "sole discretion", 0.7, 0.6,
                "Unilateral discretionary power",
                "Replace discretion with objective, reviewable standards",
            ),
            &["absolute"],
            0.15,
        ),
        lit(
            "ops-strict-compliance", C, "strict compliance", 0.6, 0.6,
            "Strict compliance standard",
            "Soften to material compliance",
        ),
        rx(
            "ops-no-force-majeure", C, r"\bno\s+force\s+majeure\b|\bforce\s+majeure\s+shall\s+not\s+apply\b",
            0.75, 0.75,
            "Force majeure protection removed",
            "Restore a standard force majeure clause",
        ),
        lit(
            "ops-exclusive-dealing", C, "exclusive dealing", 0.75, 0.7,
            "Exclusive dealing requirement",
            "Limit exclusivity by duration, field, or territory",
        ),
        rx(
            "ops-non-compete", C, r"\bnon[-\s]?compet(?:e|ition)\b|\bshall\s+not\s+compete\b", 0.65, 0.65,
            "Non-compete restriction",
            "Narrow the restricted field, duration, and geography",
        ),
        lit(
            "ops-non-solicitation", C, "non-solicitation", 0.45, 0.6,
            "Non-solicitation restriction",
            "Limit to active solicitation of named personnel",
        ),
        lit(
            "ops-freely-assignable", C, "freely assignable", 0.6, 0.65,
            "Counterparty may assign without consent",
            "Require consent for assignment, except to affiliates",
        ),
        lit(
            "ops-withhold-consent", C, "may withhold consent", 0.6, 0.6,
            "Consent can be refused without reason",
            "Add a not-unreasonably-withheld qualifier",
        ),
        lit(
            "ops-best-efforts", C, "best efforts", 0.3, 0.5,
            "Onerous best-efforts standard",
            "Use commercially reasonable efforts instead",
        ),
        lit(
            "ops-change-of-control", C, "change of control", 0.45, 0.55,
            "Change-of-control trigger",
            "Confirm the trigger does not block ordinary restructuring",
        ),
        prox(
            "ops-subcontract-liability", C, &["subcontract", "remains responsible"], 25, 0.45, 0.6,
            "Liability retained for subcontractor performance",
            "Standard flow-down; confirm back-to-back terms with subcontractors",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_weights_in_range() {
        for p in patterns() {
            assert!(
                (0.0..=1.0).contains(&p.base_severity),
                "{} severity out of range",
                p.id
            );
            assert!(
                (0.0..=1.0).contains(&p.confidence),
                "{} confidence out of range",
                p.id
            );
        }
    }

    #[test]
    fn test_every_pattern_has_guidance_text() {
        for p in patterns() {
            assert!(!p.description.is_empty(), "{} missing description", p.id);
            assert!(
                !p.recommendation.is_empty(),
                "{} missing recommendation",
                p.id
            );
        }
    }
}
