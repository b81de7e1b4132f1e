use crate::{
    affix::{expand_with, open_affix_file, AffixParser, AffixRule, RuleTable, StandaloneConvention},
    dictionary::{
        DictionarySampler, DictionarySource, MappedDictionary, SamplerOptions, WordFormRecord,
    },
    error::Result,
};
use itertools::Itertools;
use log::debug;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use std::collections::BTreeSet;
use std::path::Path;

/// Configuration for word generation
#[derive(Debug, Clone, Default)]
pub struct WordGenConfig {
    pub convention: StandaloneConvention,
    /// Fixed seed for reproducible output
    pub seed: Option<u64>,
    /// Only used by [`WordGenerator::from_files`]
    pub strict_affixes: bool,
    /// Only used by [`WordGenerator::from_files`]
    pub require_count_header: bool,
}

/// Turn a run of flag characters such as `"MS"` into a flag set.
pub fn flag_set(flags: &str) -> BTreeSet<String> {
    flags.chars().map(String::from).collect()
}

/// Samples base words and picks one surface form for each
pub struct WordGenerator<S> {
    rules: RuleTable,
    sampler: DictionarySampler<S>,
    convention: StandaloneConvention,
    rng: StdRng,
}

impl WordGenerator<MappedDictionary> {
    /// Load a `.dic`/`.aff` pair from disk.
    pub fn from_files<P, Q>(dictionary: P, affixes: Q, config: WordGenConfig) -> Result<Self>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let parser = if config.strict_affixes {
            AffixParser::strict()
        } else {
            AffixParser::lenient()
        };
        let rules = parser.parse(open_affix_file(affixes)?)?;

        let options = SamplerOptions {
            require_count_header: config.require_count_header,
        };
        let sampler =
            DictionarySampler::with_options(MappedDictionary::open(dictionary)?, options)?;

        Ok(Self::new(rules, sampler, config))
    }
}

impl<S: DictionarySource> WordGenerator<S> {
    pub fn new(rules: RuleTable, sampler: DictionarySampler<S>, config: WordGenConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rules,
            sampler,
            convention: config.convention,
            rng,
        }
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Rules tagged on `record` that exist in the table and are not ignored.
    pub fn usable_rules(&self, record: &WordFormRecord, ignore: &BTreeSet<String>) -> Vec<&AffixRule> {
        record
            .flags
            .iter()
            .filter(|flag| !ignore.contains(*flag))
            .filter_map(|flag| self.rules.get(flag))
            .collect()
    }

    /// Every surface form of `record`.
    pub fn candidates(&self, record: &WordFormRecord, ignore: &BTreeSet<String>) -> Vec<String> {
        let rules = self.usable_rules(record, ignore);
        expand_with(record.word(), &rules, self.convention)
    }

    /// Generate `count` random words.
    pub fn generate(&mut self, count: usize, ignore: &BTreeSet<String>) -> Result<Vec<String>> {
        let records = self.sampler.sample(count, &mut self.rng)?;

        let mut words = Vec::with_capacity(records.len());
        for record in &records {
            let candidates = self.candidates(record, ignore);
            debug!("{} expands to {} forms", record.base, candidates.len());
            let word = candidates
                .choose(&mut self.rng)
                .cloned()
                .unwrap_or_else(|| record.word().to_string());
            words.push(word);
        }
        Ok(words)
    }

    /// Generate `count` random words joined by `separator`.
    pub fn generate_line(
        &mut self,
        count: usize,
        ignore: &BTreeSet<String>,
        separator: &str,
    ) -> Result<String> {
        Ok(self.generate(count, ignore)?.iter().join(separator))
    }

    /// Every surface form of `count` sampled words, without picking one.
    pub fn generate_all_forms(
        &mut self,
        count: usize,
        ignore: &BTreeSet<String>,
    ) -> Result<Vec<Vec<String>>> {
        let records = self.sampler.sample(count, &mut self.rng)?;
        Ok(records
            .iter()
            .map(|record| self.candidates(record, ignore))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affix::parse_affix_rules;
    use crate::dictionary::InMemoryDictionary;

    const DOG_AFF: &str = "SFX S Y 1\nSFX S 0 s [^s]\n";

    fn create_test_generator(dic: &str, aff: &str, seed: u64) -> WordGenerator<InMemoryDictionary> {
        let rules = parse_affix_rules(aff.as_bytes()).unwrap();
        let sampler = DictionarySampler::new(InMemoryDictionary::from(dic)).unwrap();
        let config = WordGenConfig {
            seed: Some(seed),
            ..WordGenConfig::default()
        };
        WordGenerator::new(rules, sampler, config)
    }

    #[test]
    fn test_dog_yields_dog_or_dogs() {
        let mut generator = create_test_generator("1\ndog/S\n", DOG_AFF, 1);
        let mut seen = BTreeSet::new();
        for _ in 0..50 {
            let words = generator.generate(1, &BTreeSet::new()).unwrap();
            assert_eq!(words.len(), 1);
            assert!(words[0] == "dog" || words[0] == "dogs", "got {}", words[0]);
            seen.insert(words[0].clone());
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_ignored_flag_never_applied() {
        let mut generator = create_test_generator("1\ndog/S\n", DOG_AFF, 1);
        for _ in 0..50 {
            assert_eq!(generator.generate(1, &flag_set("S")).unwrap(), vec!["dog"]);
        }
    }

    #[test]
    fn test_unknown_flags_dropped() {
        let generator = create_test_generator("1\ndog/SXYZ\n", DOG_AFF, 1);
        let record = WordFormRecord::parse("dog/SXYZ").unwrap();
        let rules = generator.usable_rules(&record, &BTreeSet::new());
        assert_eq!(rules.len(), 1);
        assert_eq!(generator.candidates(&record, &BTreeSet::new()), vec!["dog", "dogs"]);
    }

    #[test]
    fn test_candidates_strip_quotes() {
        let generator = create_test_generator("1\ndog/S\n", DOG_AFF, 1);
        let record = WordFormRecord::parse("\"cat\"/S").unwrap();
        assert_eq!(generator.candidates(&record, &BTreeSet::new()), vec!["cat", "cats"]);
    }

    #[test]
    fn test_generate_line_uses_separator() {
        let mut generator = create_test_generator("1\ndog/S\n", DOG_AFF, 3);
        let line = generator.generate_line(3, &flag_set("S"), "-").unwrap();
        assert_eq!(line, "dog-dog-dog");
        let line = generator.generate_line(2, &flag_set("S"), "").unwrap();
        assert_eq!(line, "dogdog");
    }

    #[test]
    fn test_generate_all_forms() {
        let mut generator = create_test_generator("1\ndog/S\n", DOG_AFF, 3);
        let forms = generator.generate_all_forms(2, &BTreeSet::new()).unwrap();
        assert_eq!(forms, vec![vec!["dog", "dogs"], vec!["dog", "dogs"]]);
    }

    #[test]
    fn test_seed_makes_output_reproducible() {
        let dic = "5\nbake/DA\nwalk/DA\ndog/S\nfish\nbox/S\n";
        let aff = "PFX A Y 1\nPFX A 0 re .\nSFX D Y 2\nSFX D 0 d e\nSFX D 0 ed [^e]\nSFX S Y 1\nSFX S 0 s [^s]\n";
        let mut a = create_test_generator(dic, aff, 42);
        let mut b = create_test_generator(dic, aff, 42);
        let ignore = BTreeSet::new();
        assert_eq!(
            a.generate(20, &ignore).unwrap(),
            b.generate(20, &ignore).unwrap()
        );
    }

    #[test]
    fn test_flag_set() {
        assert!(flag_set("").is_empty());
        assert_eq!(flag_set("MSM").len(), 2);
    }
}
