use pokedex_core::{
    Pokemon, PokemonRepository, PokemonStore, PokemonType, PokemonValidationError, RepoError,
    StoreConfig,
};
use rusqlite::Connection;

fn pikachu() -> Pokemon {
    let mut pokemon = Pokemon::new("Pikachu", PokemonType::Electric, PokemonType::None).unwrap();
    pokemon.health = 35;
    pokemon.attack = 55;
    pokemon.defense = 40;
    pokemon.special_attack = 50;
    pokemon.special_defense = 50;
    pokemon.speed = 90;
    pokemon
}

fn pokemon(name: &str, primary: PokemonType, secondary: PokemonType, base: u32) -> Pokemon {
    let mut pokemon = Pokemon::new(name, primary, secondary).unwrap();
    pokemon.health = base;
    pokemon.attack = base + 1;
    pokemon.defense = base + 2;
    pokemon.special_attack = base + 3;
    pokemon.special_defense = base + 4;
    pokemon.speed = base + 5;
    pokemon
}

#[test]
fn create_then_read_by_name_roundtrip() {
    let store = PokemonStore::open_in_memory().unwrap();

    let created = pikachu();
    store.create(&created).unwrap();

    let loaded = store.read_by_name("Pikachu").unwrap();
    assert_eq!(loaded, created);
}

#[test]
fn pikachu_lifecycle_scenario() {
    let store = PokemonStore::open_in_memory().unwrap();
    store.create(&pikachu()).unwrap();

    let mut faster = pikachu();
    faster.speed = 95;
    store.update(&faster).unwrap();

    let loaded = store.read_by_name("Pikachu").unwrap();
    assert_eq!(loaded.speed, 95);
    assert_eq!(loaded, Pokemon { speed: 95, ..pikachu() });

    store.delete_by_name("Pikachu").unwrap();
    let err = store.read_by_name("Pikachu").unwrap_err();
    assert!(matches!(err, RepoError::NotFound(ref name) if name == "Pikachu"));
}

#[test]
fn duplicate_create_fails_and_keeps_first_record() {
    let store = PokemonStore::open_in_memory().unwrap();
    let original = pikachu();
    store.create(&original).unwrap();

    let mut impostor = pikachu();
    impostor.primary_type = PokemonType::Fire;
    impostor.health = 999;

    let err = store.create(&impostor).unwrap_err();
    assert!(matches!(err, RepoError::DuplicateName(ref name) if name == "Pikachu"));
    assert!(err.is_recoverable());

    assert_eq!(store.read_by_name("Pikachu").unwrap(), original);
    assert_eq!(store.read_all().unwrap().len(), 1);
}

#[test]
fn read_unknown_name_returns_not_found() {
    let store = PokemonStore::open_in_memory().unwrap();

    let err = store.read_by_name("Missingno").unwrap_err();
    assert!(matches!(err, RepoError::NotFound(ref name) if name == "Missingno"));
    assert!(err.is_recoverable());
}

#[test]
fn name_lookup_is_exact_match() {
    let store = PokemonStore::open_in_memory().unwrap();
    store.create(&pikachu()).unwrap();

    for probe in ["pikachu", "PIKACHU", "Pika", "Pika%", "%", "Pikachu "] {
        let err = store.read_by_name(probe).unwrap_err();
        assert!(
            matches!(err, RepoError::NotFound(_)),
            "`{probe}` should not match"
        );
    }
}

#[test]
fn names_with_sql_metacharacters_are_stored_verbatim() {
    let store = PokemonStore::open_in_memory().unwrap();
    let tricky = pokemon(
        "Farfetch'd; DROP TABLE pokemon;--",
        PokemonType::Normal,
        PokemonType::Flying,
        10,
    );
    store.create(&tricky).unwrap();

    assert_eq!(store.read_by_name(&tricky.name).unwrap(), tricky);
    assert_eq!(store.read_all().unwrap(), vec![tricky]);
}

#[test]
fn update_replaces_every_non_key_field() {
    let store = PokemonStore::open_in_memory().unwrap();
    store
        .create(&pokemon("Eevee", PokemonType::Normal, PokemonType::None, 50))
        .unwrap();

    let evolved = pokemon("Eevee", PokemonType::Water, PokemonType::Fairy, 100);
    store.update(&evolved).unwrap();

    let loaded = store.read_by_name("Eevee").unwrap();
    assert_eq!(loaded, evolved);
    assert_eq!(loaded.primary_type, PokemonType::Water);
    assert_eq!(loaded.secondary_type, PokemonType::Fairy);
    assert_eq!(loaded.health, 100);
    assert_eq!(loaded.speed, 105);
}

#[test]
fn update_touches_only_the_named_record() {
    let store = PokemonStore::open_in_memory().unwrap();
    let bulbasaur = pokemon("Bulbasaur", PokemonType::Grass, PokemonType::Poison, 45);
    let charmander = pokemon("Charmander", PokemonType::Fire, PokemonType::None, 39);
    store.create(&bulbasaur).unwrap();
    store.create(&charmander).unwrap();

    store
        .update(&pokemon("Charmander", PokemonType::Fire, PokemonType::Dragon, 78))
        .unwrap();

    assert_eq!(store.read_by_name("Bulbasaur").unwrap(), bulbasaur);
    assert_eq!(
        store.read_by_name("Charmander").unwrap().secondary_type,
        PokemonType::Dragon
    );
}

#[test]
fn update_missing_name_returns_not_found_and_leaves_storage_unchanged() {
    let store = PokemonStore::open_in_memory().unwrap();
    store.create(&pikachu()).unwrap();
    let before = store.read_all().unwrap();

    let ghost = pokemon("Gengar", PokemonType::Ghost, PokemonType::Poison, 60);
    let err = store.update(&ghost).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(ref name) if name == "Gengar"));

    assert_eq!(store.read_all().unwrap(), before);
}

#[test]
fn delete_missing_name_returns_not_found_and_leaves_storage_unchanged() {
    let store = PokemonStore::open_in_memory().unwrap();
    store.create(&pikachu()).unwrap();

    let err = store.delete_by_name("Raichu").unwrap_err();
    assert!(matches!(err, RepoError::NotFound(ref name) if name == "Raichu"));

    assert_eq!(store.read_all().unwrap(), vec![pikachu()]);
}

#[test]
fn delete_removes_only_the_named_record() {
    let store = PokemonStore::open_in_memory().unwrap();
    let squirtle = pokemon("Squirtle", PokemonType::Water, PokemonType::None, 44);
    store.create(&pikachu()).unwrap();
    store.create(&squirtle).unwrap();

    store.delete_by_name("Pikachu").unwrap();

    assert_eq!(store.read_all().unwrap(), vec![squirtle]);
    assert!(matches!(
        store.delete_by_name("Pikachu"),
        Err(RepoError::NotFound(_))
    ));
}

#[test]
fn deleted_name_can_be_created_again() {
    let store = PokemonStore::open_in_memory().unwrap();
    store.create(&pikachu()).unwrap();
    store.delete_by_name("Pikachu").unwrap();

    let mut reborn = pikachu();
    reborn.attack = 1;
    store.create(&reborn).unwrap();

    assert_eq!(store.read_by_name("Pikachu").unwrap().attack, 1);
}

#[test]
fn read_all_on_empty_store_is_empty() {
    let store = PokemonStore::open_in_memory().unwrap();
    assert!(store.read_all().unwrap().is_empty());
}

#[test]
fn read_all_returns_every_created_record() {
    let store = PokemonStore::open_in_memory().unwrap();
    let created: Vec<Pokemon> = PokemonType::ALL
        .iter()
        .enumerate()
        .map(|(index, kind)| {
            pokemon(
                &format!("Specimen-{index}"),
                *kind,
                PokemonType::ALL[PokemonType::ALL.len() - 1 - index],
                index as u32 * 10,
            )
        })
        .collect();

    for record in &created {
        store.create(record).unwrap();
    }

    assert_eq!(store.read_all().unwrap(), created);
}

#[test]
fn integer_fields_roundtrip_at_u32_bounds() {
    let store = PokemonStore::open_in_memory().unwrap();
    let mut extreme = pokemon("Blissey", PokemonType::Normal, PokemonType::None, 0);
    extreme.health = u32::MAX;
    extreme.speed = 0;
    store.create(&extreme).unwrap();

    assert_eq!(store.read_by_name("Blissey").unwrap(), extreme);
}

#[test]
fn invalid_records_are_rejected_before_any_write() {
    let store = PokemonStore::open_in_memory().unwrap();

    let mut blank = pikachu();
    blank.name = "   ".to_string();
    assert!(matches!(
        store.create(&blank),
        Err(RepoError::Validation(PokemonValidationError::EmptyName))
    ));
    assert!(matches!(
        store.update(&blank),
        Err(RepoError::Validation(PokemonValidationError::EmptyName))
    ));

    let mut long = pikachu();
    long.name = "x".repeat(51);
    assert!(matches!(
        store.create(&long),
        Err(RepoError::Validation(PokemonValidationError::NameTooLong { chars: 51, .. }))
    ));

    assert!(store.read_all().unwrap().is_empty());
}

#[test]
fn unknown_stored_type_is_fatal_invalid_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pokedex.db");
    let store = PokemonStore::open(&StoreConfig::file(&path)).unwrap();
    store.create(&pikachu()).unwrap();

    let raw = Connection::open(&path).unwrap();
    raw.execute(
        "UPDATE pokemon SET secondary_type = 'SHADOW' WHERE name = 'Pikachu';",
        [],
    )
    .unwrap();
    drop(raw);

    let err = store.read_by_name("Pikachu").unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(ref message) if message.contains("SHADOW")));
    assert!(!err.is_recoverable());

    assert!(matches!(store.read_all(), Err(RepoError::InvalidData(_))));
}

#[test]
fn store_data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::file(dir.path().join("pokedex.db"));

    {
        let store = PokemonStore::open(&config).unwrap();
        store.create(&pikachu()).unwrap();
    }

    let reopened = PokemonStore::open(&config).unwrap();
    assert_eq!(reopened.read_by_name("Pikachu").unwrap(), pikachu());
    assert!(matches!(
        reopened.create(&pikachu()),
        Err(RepoError::DuplicateName(_))
    ));
}

#[test]
fn duplicate_is_detected_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::file(dir.path().join("pokedex.db"));
    let first = PokemonStore::open(&config).unwrap();
    let second = PokemonStore::open(&config).unwrap();

    first.create(&pikachu()).unwrap();
    let err = second.create(&pikachu()).unwrap_err();

    assert!(matches!(err, RepoError::DuplicateName(_)));
    assert_eq!(first.read_all().unwrap().len(), 1);
}

#[test]
fn store_works_through_the_repository_trait_object() {
    let store = PokemonStore::open(&StoreConfig::memory()).unwrap();
    let repo: &dyn PokemonRepository = &store;

    repo.create(&pikachu()).unwrap();
    assert_eq!(repo.read_all().unwrap().len(), 1);
}
