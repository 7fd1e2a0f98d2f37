use std::error::Error;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn pick<'a>(&mut self, options: &[&'a str]) -> &'a str {
        options[(self.next_u64() % options.len() as u64) as usize]
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut rng = SimpleRng::new(42);

    let first_names = [
        "Ana", "Carlos", "Lucía", "Miguel", "Sofía", "Diego", "Valentina", "Javier",
        "Camila", "Andrés", "Paula", "Ricardo",
    ];
    let last_names = [
        "García", "Rodríguez", "Fernández", "Torres", "Mendoza", "Rojas", "Castro",
        "Vargas", "Quispe", "Morales",
    ];
    let sectors = [
        "Tecnología", "Retail", "Finanzas", "Educación", "Salud", "Manufactura",
    ];
    let cities = [
        "Lima, Perú",
        "Bogotá, Colombia",
        "Ciudad de México, México",
        "Santiago, Chile",
        "Buenos Aires, Argentina",
        "Quito, Ecuador",
    ];
    let interest_levels = ["Alto", "Medio", "Bajo"];
    let channels = ["Correo electrónico", "WhatsApp", "LinkedIn", "Llamada"];
    let company_sizes = [
        "1-10 personas",
        "11-50 personas",
        "51-200 personas",
        "Más de 200 personas",
    ];

    let output_path = "sample_contacts.csv";
    let mut writer = csv::Writer::from_path(output_path)?;

    // Trailing space on the sector header on purpose: the real exports ship
    // it that way and the loader is expected to normalize it away.
    writer.write_record([
        "Nombre completo",
        "Correo electrónico",
        "Sector o industria ",
        "Ciudad y país",
        "Nivel de interés en recibir más información",
        "Canal de contacto preferido",
        "Tamaño de tu empresa/proyecto",
    ])?;

    let n_contacts = 60;
    for i in 0..n_contacts {
        let first = rng.pick(&first_names);
        let last = rng.pick(&last_names);
        let name = format!("{first} {last}");
        let email = format!(
            "{}.{}{}@example.com",
            first.to_lowercase(),
            last.to_lowercase(),
            i
        );

        // Roughly one contact in eight skipped the interest question.
        let interest = if rng.next_u64() % 8 == 0 {
            ""
        } else {
            rng.pick(&interest_levels)
        };

        writer.write_record([
            name.as_str(),
            email.as_str(),
            rng.pick(&sectors),
            rng.pick(&cities),
            interest,
            rng.pick(&channels),
            rng.pick(&company_sizes),
        ])?;
    }

    writer.flush()?;
    println!("Wrote {n_contacts} contacts to {output_path}");
    Ok(())
}
