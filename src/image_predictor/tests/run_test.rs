#[cfg(test)]
mod run_test {
    use crate::image_classifier::backend::Backend;
    use crate::image_classifier::interface::{ImageClassifier, Prediction};
    use crate::image_predictor::core::{BackendStatus, Event, Model, Phase};
    use crate::image_predictor::tests::fixture::{write_image, Fixture};
    use std::time::Duration;

    fn cat_predictions() -> Vec<Prediction> {
        vec![
            Prediction::new("tabby, tabby cat", 0.87),
            Prediction::new("tiger cat", 0.09),
            Prediction::new("Egyptian cat", 0.03),
        ]
    }

    #[test]
    fn test_cat_upload_notifications_and_predictions() {
        let f = Fixture::new(|fake| fake.with_predictions(cat_predictions()));
        f.predictor.start();
        f.pump_until(|m| m.backend != BackendStatus::Pending);

        let path = write_image("cat.png", 32, 24);
        f.predictor.send(Event::ImageChosen { path });
        let model = f.pump_until(|m| m.phase == Phase::ResultsReady);

        assert!(!model.loading);
        assert_eq!(model.predictions, cat_predictions());
        assert_eq!(
            f.notifier.messages(),
            vec![
                "tract-optimized backend set.",
                "Loading MobileNet model...",
                "Model loaded successfully.",
                "Classifying image...",
            ]
        );
        assert!(f.notifier.errors().is_empty());
    }

    #[test]
    fn test_backend_failure_then_successful_upload() {
        let f = Fixture::new(|fake| fake.failing_backend().with_predictions(cat_predictions()));
        f.predictor.start();
        let model = f.pump_until(|m| m.backend != BackendStatus::Pending);
        assert!(matches!(model.backend, BackendStatus::Unavailable { .. }));

        f.predictor.send(Event::ImageChosen {
            path: write_image("cat.png", 16, 16),
        });
        let model = f.pump_until(|m| m.phase == Phase::ResultsReady);

        assert_eq!(model.predictions, cat_predictions());
        assert_eq!(f.notifier.errors().len(), 1);
    }

    #[test]
    fn test_model_load_failure() {
        let f = Fixture::new(|fake| fake.failing_load());
        f.predictor.send(Event::ImageChosen {
            path: write_image("cat.png", 16, 16),
        });
        let model = f.pump_until(|m| matches!(m.phase, Phase::Failed { .. }));

        assert!(!model.loading);
        assert!(model.predictions.is_empty());
        assert_eq!(f.notifier.errors().len(), 1);
        assert_eq!(f.image_classifier.classify_count(), 0);
    }

    #[test]
    fn test_classify_failure_notifies_and_clears_loading() {
        let f = Fixture::new(|fake| fake.failing_classify());
        f.predictor.send(Event::ImageChosen {
            path: write_image("cat.png", 16, 16),
        });
        let model = f.pump_until(|m| matches!(m.phase, Phase::Failed { .. }));

        assert!(!model.loading);
        assert!(model.predictions.is_empty());
        assert_eq!(f.image_classifier.classify_count(), 1);

        let errors = f.notifier.errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.starts_with("Error classifying image:"));
        assert_eq!(
            &f.notifier.messages()[..3],
            &["Loading MobileNet model...", "Model loaded successfully.", "Classifying image..."]
        );
    }

    #[test]
    fn test_loading_flag_covers_load_and_classify() {
        let f = Fixture::new(|fake| {
            fake.with_load_delay(Duration::from_millis(100))
                .with_predictions(cat_predictions())
        });
        f.predictor.send(Event::ImageChosen {
            path: write_image("cat.png", 16, 16),
        });

        let model = f.pump_until(|m| m.phase == Phase::Loading);
        assert!(model.loading);

        let model = f.pump_until(|m| m.phase == Phase::ResultsReady);
        assert!(!model.loading);
    }

    /// Uploads `name` and waits until it is the `nth` classification done.
    fn classify(f: &Fixture, name: &str, nth: usize) -> Model {
        f.predictor.send(Event::ImageChosen {
            path: write_image(name, 8, 8),
        });
        let classifier = f.image_classifier.clone();
        f.pump_until(move |m| classifier.classify_count() == nth && m.phase == Phase::ResultsReady)
    }

    #[test]
    fn test_model_reloaded_for_every_classification() {
        let f = Fixture::new(|fake| fake.with_predictions(cat_predictions()));

        classify(&f, "first.png", 1);
        let model = classify(&f, "second.png", 2);

        assert_eq!(f.image_classifier.load_count(), 2);
        assert_eq!(model.image.map(|i| i.file_name()), Some("second.png".to_string()));
        assert_eq!(
            f.notifier.messages().iter().filter(|m| *m == "Model loaded successfully.").count(),
            2
        );
    }

    #[test]
    fn test_cached_model_reused_until_backend_changes() {
        let f = Fixture::new(|fake| fake.with_cache_model(true).with_predictions(cat_predictions()));

        classify(&f, "first.png", 1);
        classify(&f, "second.png", 2);
        assert_eq!(f.image_classifier.load_count(), 1);

        assert_eq!(
            f.image_classifier.set_backend("tract-optimized"),
            Ok(Backend::Optimized)
        );
        let model = classify(&f, "third.png", 3);

        assert_eq!(f.image_classifier.load_count(), 2);
        assert_eq!(model.predictions, cat_predictions());
        assert_eq!(
            f.notifier.messages().iter().filter(|m| *m == "Model loaded successfully.").count(),
            3
        );
    }

    #[test]
    fn test_second_upload_wins_when_first_finishes_last() {
        let f = Fixture::new(|fake| {
            fake.with_predictions_fn(|image| vec![Prediction::new(image.file_name(), 0.5)])
                .with_classify_delay(|image| {
                    if image.file_name() == "slow.png" {
                        Duration::from_millis(400)
                    } else {
                        Duration::ZERO
                    }
                })
        });

        f.predictor.send(Event::ImageChosen {
            path: write_image("slow.png", 8, 8),
        });
        let classifier = f.image_classifier.clone();
        f.pump_until(move |_| classifier.classify_count() == 1);

        f.predictor.send(Event::ImageChosen {
            path: write_image("fast.png", 8, 8),
        });
        let model = f.pump_until(|m| m.phase == Phase::ResultsReady);
        assert_eq!(model.predictions, vec![Prediction::new("fast.png", 0.5)]);

        // let the slow classification finish and get dropped
        let model = f.pump_for(Duration::from_millis(600));
        assert_eq!(f.image_classifier.classify_count(), 2);
        assert_eq!(model.predictions, vec![Prediction::new("fast.png", 0.5)]);
        assert_eq!(model.image.map(|i| i.file_name()), Some("fast.png".to_string()));
        assert!(!model.loading);
    }
}
